//! Dictionary lookups for unfamiliar terms.
//!
//! Every failure mode collapses to "not found": callers get either a
//! definition or a web-search link, never an error.

use docubot_core::config::DictionaryConfig;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Definition { term: String, definition: String },
    NotFound { term: String, search_url: String },
}

impl LookupOutcome {
    pub fn term(&self) -> &str {
        match self {
            Self::Definition { term, .. } | Self::NotFound { term, .. } => term,
        }
    }
}

#[derive(Clone)]
pub struct Glossary {
    client: reqwest::Client,
    base_url: String,
    search_fallback_url: String,
}

impl Glossary {
    pub fn new(config: &DictionaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_fallback_url: config.search_fallback_url.clone(),
        }
    }

    /// First dictionary definition of `term`, if there is one.
    pub async fn lookup(&self, term: &str) -> Option<String> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        let url = format!(
            "{}/api/v2/entries/en/{}",
            self.base_url,
            urlencoding::encode(&term.to_lowercase())
        );

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(term, error = %e, "dictionary request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            debug!(term, status = %response.status(), "no dictionary entry");
            return None;
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                debug!(term, error = %e, "dictionary returned malformed JSON");
                return None;
            }
        };

        first_definition(&body)
    }

    /// Definition when available, otherwise a search link for the term.
    pub async fn explain(&self, term: &str) -> LookupOutcome {
        let trimmed = term.trim().to_string();
        match self.lookup(&trimmed).await {
            Some(definition) => LookupOutcome::Definition { term: trimmed, definition },
            None => LookupOutcome::NotFound {
                search_url: self.search_url(&trimmed),
                term: trimmed,
            },
        }
    }

    pub fn search_url(&self, term: &str) -> String {
        format!("{}{}", self.search_fallback_url, urlencoding::encode(term))
    }
}

fn first_definition(body: &Value) -> Option<String> {
    body.get(0)?
        .get("meanings")?
        .get(0)?
        .get("definitions")?
        .get(0)?
        .get("definition")?
        .as_str()
        .map(str::to_string)
}
