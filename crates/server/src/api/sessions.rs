//! Session lifecycle and document upload.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::session::{Session, SessionState, UploadOutcome};
use crate::state::AppState;

use super::{extraction_error, find_session, ApiError};

#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionCreated {
    #[schema(value_type = String)]
    pub id: Uuid,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionOverview {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub state: SessionState,
    pub filename: Option<String>,
    pub format: Option<String>,
    pub character_count: Option<usize>,
    pub has_summary: bool,
    /// Set once a summary exists; cleared by the next new upload.
    pub hide_message: bool,
    pub chat_turns: usize,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl SessionOverview {
    fn from_session(session: &Session) -> Self {
        let document = session.document();
        Self {
            id: session.id,
            state: session.state(),
            filename: session.last_filename().map(str::to_string),
            format: document.map(|d| d.format.to_string()),
            character_count: document.map(|d| d.text.chars().count()),
            has_summary: session.summary().is_some(),
            hide_message: session.hide_message(),
            chat_turns: session.chat().len(),
            created_at: session.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub outcome: UploadOutcome,
    pub session: SessionOverview,
}

// ── POST /sessions ───────────────────────────────────────────

/// Create a session
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "Sessions",
    responses((status = 201, description = "Session created", body = SessionCreated))
)]
pub async fn sessions_create(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionCreated>) {
    let (id, _) = state.sessions.create().await;
    info!(session = %id, "session created");
    (StatusCode::CREATED, Json(SessionCreated { id }))
}

// ── GET /sessions/{id} ───────────────────────────────────────

/// Session overview
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Current session state", body = SessionOverview),
        (status = 404, description = "Unknown session", body = String)
    )
)]
pub async fn sessions_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionOverview>, ApiError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(SessionOverview::from_session(&session)))
}

// ── DELETE /sessions/{id} ────────────────────────────────────

/// Drop a session and everything it holds
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Unknown session", body = String)
    )
)]
pub async fn sessions_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&id).await {
        info!(session = %id, "session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, format!("Session {id} not found")))
    }
}

// ── POST /sessions/{id}/upload ───────────────────────────────

/// Upload a document into the session
///
/// Accepts multipart/form-data; the first field carrying a filename is used.
/// Re-uploading the current filename leaves the session unchanged.
#[utoipa::path(
    post,
    path = "/sessions/{id}/upload",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session id")),
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 200, description = "Upload applied", body = UploadResponse),
        (status = 400, description = "Malformed upload", body = String),
        (status = 404, description = "Unknown session", body = String),
        (status = 413, description = "File too large", body = String),
        (status = 415, description = "Unsupported file type", body = String),
        (status = 422, description = "File could not be parsed", body = String)
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let session = find_session(&state, id).await?;

    let (filename, bytes) = loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| (e.status(), format!("Multipart error: {}", e.body_text())))?
            .ok_or((StatusCode::BAD_REQUEST, "No file provided".to_string()))?;

        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (e.status(), format!("Failed to read file: {}", e.body_text())))?;
        break (filename, bytes);
    };

    let limit = state.config.server.max_upload_bytes();
    if bytes.len() > limit {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("File exceeds {}MB limit", state.config.server.max_upload_mb),
        ));
    }

    let mut session = session.lock().await;
    let outcome = session.upload(&filename, &bytes).map_err(|e| {
        warn!(session = %id, filename = %filename, error = %e, "upload rejected");
        extraction_error(e)
    })?;

    Ok(Json(UploadResponse {
        outcome,
        session: SessionOverview::from_session(&session),
    }))
}
