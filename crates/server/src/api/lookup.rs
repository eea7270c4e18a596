use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use docubot_glossary::LookupOutcome;
use serde::Deserialize;

use crate::state::AppState;

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupParams {
    #[serde(default)]
    pub term: String,
}

/// Explain a term
///
/// Returns the first dictionary definition, or a web-search link when the
/// dictionary has nothing. Never fails.
#[utoipa::path(
    get,
    path = "/lookup",
    tag = "Lookup",
    params(LookupParams),
    responses((status = 200, description = "Definition or search link", body = Object))
)]
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> Json<LookupOutcome> {
    Json(state.glossary.explain(&params.term).await)
}
