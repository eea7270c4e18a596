//! OpenAPI documentation aggregator.
//!
//! Collects the annotated handlers into one OpenAPI spec, served via
//! Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DocuBot API",
        version = "0.1.0",
        description = "Upload a document, get stats, a word cloud and a summary, chat with a model and look up terms.",
    ),
    tags(
        (name = "Health", description = "Liveness and backend configuration"),
        (name = "Sessions", description = "Session lifecycle and document upload"),
        (name = "Analysis", description = "Text statistics, CSV export and word cloud"),
        (name = "Summary", description = "Chunked summarization and summary download"),
        (name = "Chat", description = "Per-session chat transcript"),
        (name = "Lookup", description = "Dictionary lookups with a search fallback"),
    ),
    paths(
        crate::api::health::health,
        crate::api::sessions::sessions_create,
        crate::api::sessions::sessions_get,
        crate::api::sessions::sessions_delete,
        crate::api::sessions::upload,
        crate::api::analysis::stats,
        crate::api::analysis::stats_csv,
        crate::api::analysis::wordcloud_svg,
        crate::api::summary::summarize,
        crate::api::summary::summary_txt,
        crate::api::chat::chat_history,
        crate::api::chat::chat_send,
        crate::api::lookup::lookup,
    ),
    components(schemas(
        crate::api::health::HealthResponse,
        crate::api::health::BackendStatus,
        crate::api::sessions::SessionCreated,
        crate::api::sessions::SessionOverview,
        crate::api::sessions::UploadResponse,
        crate::session::SessionState,
        crate::session::UploadOutcome,
        crate::api::analysis::StatsResponse,
        crate::api::summary::SummaryResponse,
        crate::api::chat::ChatRequest,
        crate::api::chat::ChatResponse,
        crate::api::chat::ChatHistory,
    ))
)]
pub struct ApiDoc;
