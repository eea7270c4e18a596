//! Stats, CSV export and word cloud for the loaded document.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use docubot_analysis::stats::DEFAULT_TOP_WORDS;
use docubot_analysis::{
    compute_stats, most_common_words, StatRecord, WordCloud, WordCloudConfig, WordCount,
};
use docubot_analysis::export::STATS_CSV_FILENAME;
use docubot_analysis::wordcloud::MAX_CLOUD_WORDS;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;

use super::{find_session, no_document, ApiError};

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsParams {
    /// Size of the frequency table (default 10).
    pub top: Option<usize>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StatsResponse {
    pub filename: String,
    #[schema(value_type = Object)]
    pub stats: StatRecord,
    #[schema(value_type = Vec<Object>)]
    pub top_words: Vec<WordCount>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WordCloudParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Capped at 500.
    pub max_words: Option<usize>,
}

/// Document text for a session, or the right error.
async fn document_text(state: &AppState, id: Uuid) -> Result<(String, String), ApiError> {
    let session = find_session(state, id).await?;
    let session = session.lock().await;
    let doc = session.document().ok_or_else(no_document)?;
    Ok((doc.filename.clone(), doc.text.clone()))
}

// ── GET /sessions/{id}/stats ─────────────────────────────────

/// Text statistics and most common words
#[utoipa::path(
    get,
    path = "/sessions/{id}/stats",
    tag = "Analysis",
    params(("id" = String, Path, description = "Session id"), StatsParams),
    responses(
        (status = 200, description = "Stats for the loaded document", body = StatsResponse),
        (status = 404, description = "Unknown session", body = String),
        (status = 409, description = "No document loaded", body = String)
    )
)]
pub async fn stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<StatsParams>,
) -> Result<Json<StatsResponse>, ApiError> {
    let (filename, text) = document_text(&state, id).await?;
    let top = params.top.unwrap_or(DEFAULT_TOP_WORDS);
    Ok(Json(StatsResponse {
        filename,
        stats: compute_stats(&text),
        top_words: most_common_words(&text, top),
    }))
}

// ── GET /sessions/{id}/stats.csv ─────────────────────────────

/// Download the stats as `Metric,Count` CSV
#[utoipa::path(
    get,
    path = "/sessions/{id}/stats.csv",
    tag = "Analysis",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv"),
        (status = 404, description = "Unknown session", body = String),
        (status = 409, description = "No document loaded", body = String)
    )
)]
pub async fn stats_csv(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (_, text) = document_text(&state, id).await?;
    let body = docubot_analysis::stats_csv(&compute_stats(&text))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{STATS_CSV_FILENAME}\""),
            ),
        ],
        body,
    ))
}

// ── GET /sessions/{id}/wordcloud.svg ─────────────────────────

/// Render the word cloud as SVG
#[utoipa::path(
    get,
    path = "/sessions/{id}/wordcloud.svg",
    tag = "Analysis",
    params(("id" = String, Path, description = "Session id"), WordCloudParams),
    responses(
        (status = 200, description = "SVG image", content_type = "image/svg+xml"),
        (status = 404, description = "Unknown session", body = String),
        (status = 409, description = "No document loaded", body = String)
    )
)]
pub async fn wordcloud_svg(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<WordCloudParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (_, text) = document_text(&state, id).await?;

    let defaults = WordCloudConfig::default();
    let config = WordCloudConfig {
        width: params.width.unwrap_or(defaults.width).clamp(100, 4000),
        height: params.height.unwrap_or(defaults.height).clamp(100, 4000),
        max_words: params.max_words.unwrap_or(defaults.max_words).clamp(1, MAX_CLOUD_WORDS),
        ..defaults
    };
    let svg = WordCloud::generate(&text, &config).to_svg();

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
