use std::sync::Arc;
use std::time::Duration;

use docubot_core::Config;
use docubot_glossary::Glossary;
use docubot_llm::{Aggregator, LlmProvider};

use crate::session::SessionStore;

const EVICTION_TICK: Duration = Duration::from_secs(60);

/// Shared, read-only service handles plus the session map.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// `None` when the configured backend could not be built.
    pub summarizer: Option<Aggregator>,
    pub chat: Arc<dyn LlmProvider>,
    pub glossary: Glossary,
}

/// Sweep idle sessions in the background for the life of the server.
pub fn spawn_session_eviction(state: Arc<AppState>, max_idle: Duration) -> tokio::task::JoinHandle<()> {
    let period = max_idle.min(EVICTION_TICK);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            state.sessions.evict_idle(max_idle).await;
        }
    })
}
