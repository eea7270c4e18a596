use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use docubot_core::Config;
use docubot_glossary::Glossary;
use docubot_llm::{
    Aggregator, LlmError, LlmProvider, Message, SummarizeError, Summarizer, SummaryBounds,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::router::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

const BOUNDARY: &str = "docubot-test-boundary";

/// Returns the chunk's word count, or fails when told to.
struct CountingSummarizer {
    fail: bool,
}

#[async_trait]
impl Summarizer for CountingSummarizer {
    async fn summarize_chunk(
        &self,
        chunk: &str,
        _bounds: SummaryBounds,
    ) -> Result<String, SummarizeError> {
        if self.fail {
            return Err(SummarizeError::Api { status: 503, body: "loading".into() });
        }
        Ok(format!("[{} words]", chunk.split_whitespace().count()))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

struct Echo;

#[async_trait]
impl LlmProvider for Echo {
    async fn complete(
        &self,
        messages: Vec<Message>,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmError> {
        Ok(format!("you said: {}", messages[0].content))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

fn test_config() -> Config {
    let mut config = Config::for_profile("DOCUBOT_ROUTER_TESTS");
    config.server.max_upload_mb = 1;
    config.server.cors_origin = "*".into();
    config
}

fn app_with(config: Config, summarizer_fails: bool) -> Router {
    let aggregator = Aggregator::new(
        Arc::new(CountingSummarizer { fail: summarizer_fails }),
        500,
        SummaryBounds::default(),
    );
    let state = AppState {
        glossary: Glossary::new(&config.dictionary),
        config,
        sessions: SessionStore::default(),
        summarizer: Some(aggregator),
        chat: Arc::new(Echo),
    };
    build_router(Arc::new(state))
}

fn app() -> Router {
    app_with(test_config(), false)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn upload_request(session: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(format!("/sessions/{session}/upload"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn new_session(app: &Router) -> String {
    let (status, body) = send(app, post_json("/sessions", json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let v: Value = serde_json::from_slice(&body).unwrap();
    v["id"].as_str().unwrap().to_string()
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    let v = json_body(&body);
    assert_eq!(v["status"], "ok");
    assert_eq!(v["summarizer"]["name"], "counting");
    assert!(v["config"]["llm"].get("gemini_api_key").is_none());
}

#[tokio::test]
async fn unknown_session_is_404() {
    let app = app();
    let id = uuid::Uuid::new_v4();
    let (status, _) = send(&app, get(&format!("/sessions/{id}/stats"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_before_upload_is_409() {
    let app = app();
    let id = new_session(&app).await;
    let (status, _) = send(&app, get(&format!("/sessions/{id}/stats"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn upload_then_stats_and_csv() {
    let app = app();
    let id = new_session(&app).await;

    let text = b"The court ruled. The appeal failed!\n\nCosts were awarded.";
    let (status, body) = send(&app, upload_request(&id, "ruling.txt", text)).await;
    assert_eq!(status, StatusCode::OK);
    let v = json_body(&body);
    assert_eq!(v["outcome"], "loaded");
    assert_eq!(v["session"]["state"], "loaded");
    assert_eq!(v["session"]["format"], "txt");

    let (status, body) = send(&app, get(&format!("/sessions/{id}/stats?top=1"))).await;
    assert_eq!(status, StatusCode::OK);
    let v = json_body(&body);
    assert_eq!(v["stats"]["word_count"], 9);
    assert_eq!(v["stats"]["sentence_count"], 3);
    assert_eq!(v["stats"]["paragraph_count"], 2);
    assert_eq!(v["top_words"], json!([{ "word": "The", "count": 2 }]));

    let response = app
        .clone()
        .oneshot(get(&format!("/sessions/{id}/stats.csv")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"text_stats.csv\""
    );
    let csv = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(csv.to_vec()).unwrap();
    assert!(csv.starts_with("Metric,Count\nWords,9\nSentences,3\nParagraphs,2\n"));
}

#[tokio::test]
async fn unsupported_upload_is_415_and_changes_nothing() {
    let app = app();
    let id = new_session(&app).await;

    let (status, _) = send(&app, upload_request(&id, "budget.xlsx", b"PK\x03\x04")).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (_, body) = send(&app, get(&format!("/sessions/{id}"))).await;
    let v = json_body(&body);
    assert_eq!(v["state"], "empty");
    assert!(v["filename"].is_null());
}

#[tokio::test]
async fn oversized_upload_is_413() {
    let app = app();
    let id = new_session(&app).await;
    let big = vec![b'a'; 1024 * 1024 + 1];
    let (status, _) = send(&app, upload_request(&id, "big.txt", &big)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn summarize_stores_summary_until_new_upload() {
    let app = app();
    let id = new_session(&app).await;
    let words: Vec<String> = (0..700).map(|i| format!("w{i}")).collect();
    send(&app, upload_request(&id, "long.txt", words.join(" ").as_bytes())).await;

    let (status, body) = send(&app, post_json(&format!("/sessions/{id}/summarize"), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["summary"], "[500 words] [200 words]");

    let (status, body) = send(&app, get(&format!("/sessions/{id}/summary.txt"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[500 words] [200 words]");

    // Same filename: nothing is re-extracted, the summary survives.
    let (_, body) = send(&app, upload_request(&id, "long.txt", b"different")).await;
    let v = json_body(&body);
    assert_eq!(v["outcome"], "unchanged");
    assert_eq!(v["session"]["has_summary"], true);
    assert_eq!(v["session"]["hide_message"], true);

    // New filename: summary is invalidated.
    let (_, body) = send(&app, upload_request(&id, "short.txt", b"brief")).await;
    let v = json_body(&body);
    assert_eq!(v["session"]["has_summary"], false);
    assert_eq!(v["session"]["hide_message"], false);
    let (status, _) = send(&app, get(&format!("/sessions/{id}/summary.txt"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn failed_summarization_is_502_and_stores_nothing() {
    let app = app_with(test_config(), true);
    let id = new_session(&app).await;
    send(&app, upload_request(&id, "doc.txt", b"some words here")).await;

    let (status, body) = send(&app, post_json(&format!("/sessions/{id}/summarize"), json!({}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(String::from_utf8_lossy(&body).contains("chunk 0"));

    let (_, body) = send(&app, get(&format!("/sessions/{id}"))).await;
    assert_eq!(json_body(&body)["has_summary"], false);
}

#[tokio::test]
async fn chat_appends_turns_and_ignores_blank_messages() {
    let app = app();
    let id = new_session(&app).await;
    let uri = format!("/sessions/{id}/chat");

    let (status, body) = send(&app, post_json(&uri, json!({ "message": "  hello " }))).await;
    assert_eq!(status, StatusCode::OK);
    let v = json_body(&body);
    assert_eq!(v["turn"]["user"], "hello");
    assert_eq!(v["turn"]["reply"], "you said: hello");
    assert_eq!(v["total_turns"], 1);

    let (_, body) = send(&app, post_json(&uri, json!({ "message": "   " }))).await;
    let v = json_body(&body);
    assert!(v["turn"].is_null());
    assert_eq!(v["total_turns"], 1);

    let (_, body) = send(&app, get(&uri)).await;
    assert_eq!(json_body(&body)["turns"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn wordcloud_is_svg() {
    let app = app();
    let id = new_session(&app).await;
    send(&app, upload_request(&id, "cloud.txt", b"contract contract clause liability clause contract")).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/sessions/{id}/wordcloud.svg?width=400&height=200&max_words=1000000")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    let svg = response.into_body().collect().await.unwrap().to_bytes();
    let svg = String::from_utf8(svg.to_vec()).unwrap();
    assert!(svg.contains(">contract</text>"));
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let app = app();
    let id = new_session(&app).await;
    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/sessions/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&format!("/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lookup_falls_back_to_search_link() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut config = test_config();
    config.dictionary.base_url = server.uri();
    let app = app_with(config, false);

    let (status, body) = send(&app, get("/lookup?term=mens%20rea")).await;
    assert_eq!(status, StatusCode::OK);
    let v = json_body(&body);
    assert_eq!(v["status"], "not_found");
    assert_eq!(v["term"], "mens rea");
    assert!(v["search_url"].as_str().unwrap().ends_with("mens%20rea"));
}
