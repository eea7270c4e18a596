use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use docubot_analysis::export::SUMMARY_FILENAME;
use docubot_llm::SummarizeError;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

use super::{find_session, no_document, ApiError};

#[derive(Serialize, utoipa::ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
    pub backend: String,
}

// ── POST /sessions/{id}/summarize ────────────────────────────

/// Summarize the loaded document
///
/// The session stays locked for the whole run, so concurrent requests on
/// the same session wait their turn. A failed run stores nothing.
#[utoipa::path(
    post,
    path = "/sessions/{id}/summarize",
    tag = "Summary",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Summary stored", body = SummaryResponse),
        (status = 404, description = "Unknown session", body = String),
        (status = 409, description = "No document loaded", body = String),
        (status = 502, description = "Summarizer backend failed", body = String),
        (status = 503, description = "Summarizer not configured", body = String)
    )
)]
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let aggregator = state.summarizer.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "Summarizer not configured".to_string(),
    ))?;

    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let text = session.document().ok_or_else(no_document)?.text.clone();

    let summary = aggregator.summarize(&text).await.map_err(|e| {
        warn!(session = %id, error = %e, "summarization failed");
        let status = match e {
            SummarizeError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, format!("An error occurred: {e}"))
    })?;

    info!(session = %id, chars = summary.len(), "summary stored");
    session.set_summary(summary.clone());

    Ok(Json(SummaryResponse {
        summary,
        backend: aggregator.backend_name().to_string(),
    }))
}

// ── GET /sessions/{id}/summary.txt ───────────────────────────

/// Download the stored summary as plain text
#[utoipa::path(
    get,
    path = "/sessions/{id}/summary.txt",
    tag = "Summary",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Summary text", content_type = "text/plain"),
        (status = 404, description = "Unknown session", body = String),
        (status = 409, description = "No summary yet", body = String)
    )
)]
pub async fn summary_txt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    let summary = session.summary().ok_or((
        StatusCode::CONFLICT,
        "No summary yet. POST /sessions/{id}/summarize first.".to_string(),
    ))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SUMMARY_FILENAME}\""),
            ),
        ],
        docubot_analysis::summary_text(summary),
    ))
}
