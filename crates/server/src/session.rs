//! Per-user session state.
//!
//! A session holds at most one loaded document. Uploading a file with the
//! same name as the last one is a no-op; a different name replaces the
//! document and invalidates the summary in the same step.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use docubot_core::Document;
use docubot_ingest::ExtractionError;
use docubot_llm::ChatSession;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Empty,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadOutcome {
    /// Text was extracted and replaced the previous document.
    Loaded,
    /// Same filename as the last upload; nothing changed.
    Unchanged,
}

pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    document: Option<Document>,
    last_filename: Option<String>,
    summary: Option<String>,
    hide_message: bool,
    chat: ChatSession,
}

impl Session {
    pub fn new(id: Uuid, chat: ChatSession) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            document: None,
            last_filename: None,
            summary: None,
            hide_message: false,
            chat,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.document.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Empty
        }
    }

    /// Apply an upload. On error the session is left exactly as it was.
    pub fn upload(&mut self, filename: &str, bytes: &[u8]) -> Result<UploadOutcome, ExtractionError> {
        if self.last_filename.as_deref() == Some(filename) {
            return Ok(UploadOutcome::Unchanged);
        }

        let extracted = docubot_ingest::extract_text(bytes, filename)?;
        info!(
            session = %self.id,
            filename,
            format = %extracted.format,
            pages = extracted.pages.len(),
            chars = extracted.total_chars(),
            "document loaded"
        );
        let document = extracted.into_document();

        self.document = Some(document);
        self.summary = None;
        self.hide_message = false;
        self.last_filename = Some(filename.to_string());
        Ok(UploadOutcome::Loaded)
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn last_filename(&self) -> Option<&str> {
        self.last_filename.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Store a completed summary; the upload notice is hidden from then on.
    pub fn set_summary(&mut self, summary: String) {
        self.summary = Some(summary);
        self.hide_message = true;
    }

    pub fn hide_message(&self) -> bool {
        self.hide_message
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

struct Entry {
    session: SharedSession,
    /// Milliseconds since the store's epoch at the last lookup.
    last_seen: AtomicU64,
}

/// All live sessions. Each session has its own lock, so a slow summary in
/// one session never blocks another.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    epoch: Instant,
    chat_temperature: f32,
    chat_max_tokens: u32,
}

impl SessionStore {
    pub fn new(chat_temperature: f32, chat_max_tokens: u32) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            epoch: Instant::now(),
            chat_temperature,
            chat_max_tokens,
        }
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    pub async fn create(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let chat = ChatSession::new(self.chat_temperature, self.chat_max_tokens);
        let session = Arc::new(Mutex::new(Session::new(id, chat)));
        let entry = Entry {
            session: session.clone(),
            last_seen: AtomicU64::new(self.now_ms()),
        };
        self.sessions.write().await.insert(id, entry);
        (id, session)
    }

    /// Look up a session and mark it as recently used.
    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(id)?;
        entry.last_seen.store(self.now_ms(), Ordering::Relaxed);
        Some(entry.session.clone())
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions not looked up for longer than `max_idle`. Sessions a
    /// request still holds are kept. Returns how many were dropped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = self.now_ms();
        let limit = max_idle.as_millis() as u64;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            let idle = now.saturating_sub(entry.last_seen.load(Ordering::Relaxed));
            idle <= limit || Arc::strong_count(&entry.session) > 1
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "idle sessions evicted");
        }
        evicted
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(0.7, 2048)
    }
}
