use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use docubot_llm::ChatTurn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;

use super::{find_session, ApiError};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChatResponse {
    /// The appended turn; absent when the message was blank.
    #[schema(value_type = Option<Object>)]
    pub turn: Option<ChatTurn>,
    pub total_turns: usize,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChatHistory {
    #[schema(value_type = Vec<Object>)]
    pub turns: Vec<ChatTurn>,
}

/// Chat transcript
#[utoipa::path(
    get,
    path = "/sessions/{id}/chat",
    tag = "Chat",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Transcript in send order", body = ChatHistory),
        (status = 404, description = "Unknown session", body = String)
    )
)]
pub async fn chat_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatHistory>, ApiError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(ChatHistory {
        turns: session.chat().turns().to_vec(),
    }))
}

/// Send a chat message
///
/// Provider failures do not fail the request; they are recorded as the
/// reply of the new turn.
#[utoipa::path(
    post,
    path = "/sessions/{id}/chat",
    tag = "Chat",
    params(("id" = String, Path, description = "Session id")),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Turn appended (or ignored if blank)", body = ChatResponse),
        (status = 404, description = "Unknown session", body = String)
    )
)]
pub async fn chat_send(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;

    let chat = session.chat_mut();
    let turn = chat.send(state.chat.as_ref(), &req.message).await.cloned();

    Ok(Json(ChatResponse {
        turn,
        total_turns: chat.len(),
    }))
}
