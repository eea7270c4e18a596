//! HTTP handlers, one module per area.
//!
//! Errors are `(StatusCode, String)` pairs; helpers here map domain errors
//! onto status codes so every handler reports them the same way.

mod analysis;
mod chat;
pub mod doc;
mod health;
mod lookup;
mod sessions;
mod summary;

#[cfg(test)]
mod tests;

use axum::http::StatusCode;
use docubot_ingest::ExtractionError;
use uuid::Uuid;

use crate::session::SharedSession;
use crate::state::AppState;

pub type ApiError = (StatusCode, String);

pub(crate) async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, ApiError> {
    state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Session {id} not found")))
}

pub(crate) fn no_document() -> ApiError {
    (
        StatusCode::CONFLICT,
        "No document loaded. Upload a .txt, .pdf or .docx file first.".to_string(),
    )
}

pub(crate) fn extraction_error(e: ExtractionError) -> ApiError {
    let status = match e {
        ExtractionError::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ExtractionError::PdfError(_) | ExtractionError::DocxError(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ExtractionError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

// Flat `api::foo` paths used by the router.
pub use analysis::{stats, stats_csv, wordcloud_svg};
pub use chat::{chat_history, chat_send};
pub use health::health;
pub use lookup::lookup;
pub use sessions::{sessions_create, sessions_delete, sessions_get, upload};
pub use summary::{summarize, summary_txt};
