//! HTTP router construction.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Multipart framing overhead allowed on top of the file size limit.
const MULTIPART_SLACK: usize = 64 * 1024;

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!("Invalid CORS_ORIGIN '{}', falling back to permissive CORS", origin);
            CorsLayer::permissive()
        }
    }
}

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.server.max_upload_bytes() + MULTIPART_SLACK;
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health))
        .route("/lookup", get(api::lookup))
        .route("/sessions", post(api::sessions_create))
        .route(
            "/sessions/{id}",
            get(api::sessions_get).delete(api::sessions_delete),
        )
        .route(
            "/sessions/{id}/upload",
            post(api::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/sessions/{id}/stats", get(api::stats))
        .route("/sessions/{id}/stats.csv", get(api::stats_csv))
        .route("/sessions/{id}/wordcloud.svg", get(api::wordcloud_svg))
        .route("/sessions/{id}/summarize", post(api::summarize))
        .route("/sessions/{id}/summary.txt", get(api::summary_txt))
        .route(
            "/sessions/{id}/chat",
            get(api::chat_history).post(api::chat_send),
        )
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}
