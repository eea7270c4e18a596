use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Load `.env` from the working directory; a missing file is not an error.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// `{PROFILE}_{KEY}` when a profile is active and the key is set, else `{KEY}`.
fn lookup(profile: &str, key: &str) -> Option<String> {
    let scoped = (!profile.is_empty())
        .then(|| non_empty_var(&format!("{profile}_{key}")))
        .flatten();
    scoped.or_else(|| non_empty_var(key))
}

fn lookup_or(profile: &str, key: &str, default: &str) -> String {
    lookup(profile, key).unwrap_or_else(|| default.to_string())
}

/// Parsed lookup; unparsable values fall back to `default`.
fn lookup_parsed<T: FromStr>(profile: &str, key: &str, default: T) -> T {
    lookup(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub summarizer: SummarizerConfig,
    pub dictionary: DictionaryConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `DOCUBOT_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = non_empty_var("DOCUBOT_PROFILE").unwrap_or_default().to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            summarizer: SummarizerConfig::from_env_profiled(p),
            dictionary: DictionaryConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  server:      {}:{}, max_upload={}MB, session_idle={}min",
            self.server.host,
            self.server.port,
            self.server.max_upload_mb,
            self.server.session_idle_minutes
        );
        tracing::info!("  llm:         provider={}, configured={}", self.llm.provider, self.llm.is_configured());
        tracing::info!(
            "  summarizer:  backend={}, chunk_words={}, length={}..{}",
            self.summarizer.backend,
            self.summarizer.chunk_words,
            self.summarizer.min_length,
            self.summarizer.max_length
        );
        tracing::info!("  dictionary:  base_url={}", self.dictionary.base_url);
    }

    /// Return a redacted view safe for API responses (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": {
                "host": self.server.host,
                "port": self.server.port,
                "max_upload_mb": self.server.max_upload_mb,
                "session_idle_minutes": self.server.session_idle_minutes,
            },
            "llm": {
                "provider": self.llm.provider,
                "configured": self.llm.is_configured(),
            },
            "summarizer": {
                "backend": self.summarizer.backend,
                "model": self.summarizer.hf_model,
                "chunk_words": self.summarizer.chunk_words,
                "min_length": self.summarizer.min_length,
                "max_length": self.summarizer.max_length,
                "configured": self.summarizer.is_configured(&self.llm),
            },
            "dictionary": { "base_url": self.dictionary.base_url },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    /// Upload size ceiling in megabytes.
    pub max_upload_mb: usize,
    /// Sessions untouched for this long are dropped; 0 keeps them forever.
    pub session_idle_minutes: u64,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: lookup_or(p, "HOST", "0.0.0.0"),
            port: lookup_parsed(p, "PORT", 3001),
            cors_origin: lookup_or(p, "CORS_ORIGIN", "*"),
            max_upload_mb: lookup_parsed(p, "MAX_UPLOAD_MB", 50),
            session_idle_minutes: lookup_parsed(p, "SESSION_IDLE_MINUTES", 60),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }

    pub fn session_idle_ttl(&self) -> Option<std::time::Duration> {
        (self.session_idle_minutes > 0)
            .then(|| std::time::Duration::from_secs(self.session_idle_minutes * 60))
    }
}

// ── LLM (Gemini / OpenAI-compatible) ─────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini" or "openai". Local servers (Ollama, vLLM) go through "openai"
    /// with `OPENAI_BASE_URL` pointed at them.
    pub provider: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: lookup_or(p, "LLM_PROVIDER", "gemini"),
            gemini_api_key: lookup(p, "GEMINI_API_KEY"),
            gemini_model: lookup_or(p, "GEMINI_MODEL", "gemini-1.5-pro"),
            gemini_base_url: lookup_or(
                p,
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com",
            ),
            openai_api_key: lookup(p, "OPENAI_API_KEY"),
            openai_model: lookup_or(p, "OPENAI_MODEL", "gpt-4o"),
            openai_base_url: lookup_or(p, "OPENAI_BASE_URL", "https://api.openai.com"),
            temperature: lookup_parsed(p, "LLM_TEMPERATURE", 0.7),
            max_tokens: lookup_parsed(p, "LLM_MAX_TOKENS", 2048),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "gemini" => self.gemini_api_key.is_some(),
            // Keyless OpenAI-compatible servers are fine when they run locally.
            "openai" => self.openai_api_key.is_some() || self.is_local_openai(),
            _ => false,
        }
    }

    fn is_local_openai(&self) -> bool {
        self.openai_base_url.contains("localhost") || self.openai_base_url.contains("127.0.0.1")
    }
}

// ── Summarizer ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// "huggingface" or "llm"
    pub backend: String,
    pub hf_api_token: Option<String>,
    pub hf_model: String,
    pub hf_base_url: String,
    /// Word budget per chunk sent to the summarizer.
    pub chunk_words: usize,
    pub min_length: u32,
    pub max_length: u32,
}

impl SummarizerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            backend: lookup_or(p, "SUMMARIZER_BACKEND", "huggingface"),
            hf_api_token: lookup(p, "HF_API_TOKEN"),
            hf_model: lookup_or(p, "HF_SUMMARY_MODEL", "sshleifer/distilbart-cnn-12-6"),
            hf_base_url: lookup_or(p, "HF_BASE_URL", "https://api-inference.huggingface.co"),
            chunk_words: lookup_parsed(p, "SUMMARY_CHUNK_WORDS", 500),
            min_length: lookup_parsed(p, "SUMMARY_MIN_LENGTH", 30),
            max_length: lookup_parsed(p, "SUMMARY_MAX_LENGTH", 130),
        }
    }

    pub fn is_configured(&self, llm: &LlmConfig) -> bool {
        match self.backend.as_str() {
            "huggingface" | "hf" => self.hf_api_token.is_some(),
            "llm" => llm.is_configured(),
            _ => false,
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            backend: "huggingface".to_string(),
            hf_api_token: None,
            hf_model: "sshleifer/distilbart-cnn-12-6".to_string(),
            hf_base_url: "https://api-inference.huggingface.co".to_string(),
            chunk_words: 500,
            min_length: 30,
            max_length: 130,
        }
    }
}

// ── Dictionary lookup ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    pub base_url: String,
    /// Prefix the URL-encoded term is appended to when no definition is found.
    pub search_fallback_url: String,
}

impl DictionaryConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            base_url: lookup_or(p, "DICTIONARY_BASE_URL", "https://api.dictionaryapi.dev"),
            search_fallback_url: lookup_or(
                p,
                "SEARCH_FALLBACK_URL",
                "https://www.google.com/search?q=legal+term+",
            ),
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dictionaryapi.dev".to_string(),
            search_fallback_url: "https://www.google.com/search?q=legal+term+".to_string(),
        }
    }
}
