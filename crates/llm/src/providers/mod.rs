pub mod gemini;
pub mod openai;

use docubot_core::config::LlmConfig;

use async_trait::async_trait;

use crate::provider::{LlmError, LlmProvider, Message};

/// Stand-in used when no provider could be built. Every call fails with the
/// original configuration error, so callers surface it where they would
/// surface any other provider failure.
pub struct Unconfigured {
    reason: String,
}

impl Unconfigured {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl LlmProvider for Unconfigured {
    async fn complete(
        &self,
        _messages: Vec<Message>,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "unconfigured"
    }
}

/// Create the appropriate LLM provider based on config.
pub fn create_provider(llm_config: &LlmConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    match llm_config.provider.as_str() {
        "gemini" => {
            let api_key = llm_config
                .gemini_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("GEMINI_API_KEY not set".into()))?;
            Ok(Box::new(gemini::GeminiProvider::new(
                api_key.clone(),
                llm_config.gemini_model.clone(),
                llm_config.gemini_base_url.clone(),
            )))
        }
        "openai" => {
            if !llm_config.is_configured() {
                return Err(LlmError::NotConfigured("OPENAI_API_KEY not set".into()));
            }
            Ok(Box::new(openai::OpenAiProvider::new(
                llm_config.openai_api_key.clone(),
                llm_config.openai_model.clone(),
                llm_config.openai_base_url.clone(),
            )))
        }
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}
