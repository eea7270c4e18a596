use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct BackendStatus {
    pub name: String,
    pub configured: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
    pub summarizer: BackendStatus,
    pub chat: BackendStatus,
    #[schema(value_type = Object)]
    pub config: serde_json::Value,
}

/// Liveness and backend configuration
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let config = &state.config;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.sessions.len().await,
        summarizer: BackendStatus {
            name: state
                .summarizer
                .as_ref()
                .map(|s| s.backend_name().to_string())
                .unwrap_or_else(|| config.summarizer.backend.clone()),
            configured: config.summarizer.is_configured(&config.llm),
        },
        chat: BackendStatus {
            name: config.llm.provider.clone(),
            configured: config.llm.is_configured(),
        },
        config: config.redacted_summary(),
    })
}
