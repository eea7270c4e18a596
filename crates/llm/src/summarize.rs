//! Chunked summarization.
//!
//! Long documents are split into word-bounded chunks, each chunk goes through
//! a [`Summarizer`] backend in order, and the partial summaries are joined
//! with single spaces. Any chunk failure fails the whole run.

use std::sync::Arc;

use async_trait::async_trait;
use docubot_core::config::{LlmConfig, SummarizerConfig};
use docubot_ingest::ChunkConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::provider::{LlmError, LlmProvider, Message};
use crate::providers::create_provider;

/// Length limits handed to the backend for every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBounds {
    pub min_length: u32,
    pub max_length: u32,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self { min_length: 30, max_length: 130 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("document has no text to summarize")]
    EmptyInput,
    #[error("summarizing chunk {index} failed: {source}")]
    ChunkFailed {
        index: usize,
        #[source]
        source: Box<SummarizeError>,
    },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Parse(String),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("summarizer not configured: {0}")]
    NotConfigured(String),
}

/// A black-box text summarizer applied to one chunk at a time.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize_chunk(
        &self,
        chunk: &str,
        bounds: SummaryBounds,
    ) -> Result<String, SummarizeError>;

    fn name(&self) -> &str;
}

// ── Hugging Face inference endpoint ───────────────────────────

pub struct HuggingFaceSummarizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: HfParameters,
}

#[derive(Serialize)]
struct HfParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct HfSummary {
    summary_text: String,
}

impl HuggingFaceSummarizer {
    pub fn new(base_url: String, model: String, api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_token,
        }
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize_chunk(
        &self,
        chunk: &str,
        bounds: SummaryBounds,
    ) -> Result<String, SummarizeError> {
        let request = HfRequest {
            inputs: chunk,
            parameters: HfParameters {
                min_length: bounds.min_length,
                max_length: bounds.max_length,
                do_sample: false,
            },
        };

        let mut builder = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api { status, body });
        }

        let parsed: Vec<HfSummary> = response
            .json()
            .await
            .map_err(|e| SummarizeError::Parse(e.to_string()))?;

        parsed
            .into_iter()
            .next()
            .map(|s| s.summary_text)
            .ok_or_else(|| SummarizeError::Parse("empty summary list".into()))
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

// ── Generic LLM backend ───────────────────────────────────────

/// Summarizes through any chat provider with an instruction prompt.
pub struct LlmSummarizer {
    provider: Arc<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmSummarizer {
    pub fn new(provider: Arc<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self { provider, temperature, max_tokens }
    }

    fn prompt(chunk: &str, bounds: SummaryBounds) -> Vec<Message> {
        vec![
            Message::system(format!(
                "You summarize documents. Write a summary of between {} and {} words. \
                 Reply with the summary text only.",
                bounds.min_length, bounds.max_length
            )),
            Message::user(chunk),
        ]
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize_chunk(
        &self,
        chunk: &str,
        bounds: SummaryBounds,
    ) -> Result<String, SummarizeError> {
        let reply = self
            .provider
            .complete(Self::prompt(chunk, bounds), self.temperature, self.max_tokens)
            .await?;
        Ok(reply.trim().to_string())
    }

    fn name(&self) -> &str {
        self.provider.name()
    }
}

// ── Aggregator ────────────────────────────────────────────────

/// Chunk, summarize each chunk in order, concatenate.
#[derive(Clone)]
pub struct Aggregator {
    summarizer: Arc<dyn Summarizer>,
    chunking: ChunkConfig,
    bounds: SummaryBounds,
}

impl Aggregator {
    pub fn new(summarizer: Arc<dyn Summarizer>, chunk_words: usize, bounds: SummaryBounds) -> Self {
        Self {
            summarizer,
            chunking: ChunkConfig { max_words: chunk_words },
            bounds,
        }
    }

    /// Build the backend named by `SUMMARIZER_BACKEND`.
    pub fn from_config(
        config: &SummarizerConfig,
        llm_config: &LlmConfig,
    ) -> Result<Self, SummarizeError> {
        let summarizer: Arc<dyn Summarizer> = match config.backend.as_str() {
            "huggingface" | "hf" => {
                if config.hf_api_token.is_none() {
                    warn!("HF_API_TOKEN not set; anonymous inference requests are heavily rate limited");
                }
                Arc::new(HuggingFaceSummarizer::new(
                    config.hf_base_url.clone(),
                    config.hf_model.clone(),
                    config.hf_api_token.clone(),
                ))
            }
            "llm" => {
                let provider: Arc<dyn LlmProvider> = Arc::from(create_provider(llm_config)?);
                Arc::new(LlmSummarizer::new(
                    provider,
                    llm_config.temperature,
                    llm_config.max_tokens,
                ))
            }
            other => {
                return Err(SummarizeError::NotConfigured(format!(
                    "unknown summarizer backend: '{}'",
                    other
                )))
            }
        };

        let bounds = SummaryBounds {
            min_length: config.min_length,
            max_length: config.max_length,
        };
        Ok(Self::new(summarizer, config.chunk_words, bounds))
    }

    pub fn backend_name(&self) -> &str {
        self.summarizer.name()
    }

    /// Summarize `text`. Either every chunk succeeds or nothing is returned.
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let chunks = docubot_ingest::chunk_with(text, &self.chunking);
        if chunks.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        info!(
            chunks = chunks.len(),
            backend = self.summarizer.name(),
            "summarizing document"
        );

        let mut parts = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let index = chunk.index;
            let part = self
                .summarizer
                .summarize_chunk(&chunk.content, self.bounds)
                .await
                .map_err(|e| {
                    warn!(index, error = %e, "chunk summarization failed");
                    SummarizeError::ChunkFailed { index, source: Box::new(e) }
                })?;
            debug!(index, words = chunk.word_count, chars = part.len(), "chunk summarized");
            parts.push(part);
        }

        Ok(parts.join(" "))
    }
}
