//! Application configuration builders.
//!
//! Turns `Config` into the service handles held by `AppState`. Missing
//! credentials disable a feature instead of aborting startup.

use std::sync::Arc;

use docubot_core::Config;
use docubot_glossary::Glossary;
use docubot_llm::{create_provider, Aggregator, LlmError, LlmProvider, Unconfigured};
use tracing::{info, warn};

use crate::session::SessionStore;
use crate::state::AppState;

/// Load configuration from `.env` and environment variables.
pub fn load_config() -> Config {
    docubot_core::config::load_dotenv();
    Config::from_env()
}

pub fn build_summarizer(config: &Config) -> Option<Aggregator> {
    match Aggregator::from_config(&config.summarizer, &config.llm) {
        Ok(agg) => {
            info!(
                "Summarizer ready (backend: {}, chunk_words: {})",
                agg.backend_name(),
                config.summarizer.chunk_words
            );
            Some(agg)
        }
        Err(e) => {
            warn!("Summarizer not available: {} (summarize endpoint disabled)", e);
            None
        }
    }
}

/// Chat always gets a provider; without credentials every reply is an
/// inline configuration error.
pub fn build_chat_provider(config: &Config) -> Arc<dyn LlmProvider> {
    match create_provider(&config.llm) {
        Ok(provider) => {
            info!("Chat provider ready (provider: {})", provider.name());
            Arc::from(provider)
        }
        Err(e) => {
            warn!("Chat provider not available: {}", e);
            let reason = match e {
                LlmError::NotConfigured(reason) => reason,
                other => other.to_string(),
            };
            Arc::new(Unconfigured::new(reason))
        }
    }
}

pub fn build_app_state(config: Config) -> Arc<AppState> {
    let summarizer = build_summarizer(&config);
    let chat = build_chat_provider(&config);
    let glossary = Glossary::new(&config.dictionary);
    let sessions = SessionStore::new(config.llm.temperature, config.llm.max_tokens);

    Arc::new(AppState {
        config,
        sessions,
        summarizer,
        chat,
        glossary,
    })
}
