use std::sync::Arc;
use std::time::Duration;

use ragchat::api::{ApiError, Backend, HttpBackend};
use ragchat::core::action::{Effect, update};
use ragchat::core::config::UiCopy;
use ragchat::core::message::{FALLBACK_REPLY, Role};
use ragchat::core::state::App;
use ragchat::dispatch;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&server.uri(), Some(Duration::from_secs(5))).unwrap()
}

async fn mount_catalog_answer(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({ "question": "What tractors do you sell?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "We sell X and Y.",
            "sources": [
                { "source": "catalog.pdf", "relevance_score": 0.91 },
                { "source": "price-list.xlsx", "relevance_score": 0.456 }
            ],
            "processing_time": 1.2
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Status endpoints
// ============================================================================

#[tokio::test]
async fn test_health_parses_connected_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "database_connected": true,
            "documents_loaded": 42
        })))
        .mount(&server)
        .await;

    let health = backend_for(&server).health().await.unwrap();

    assert!(health.database_connected);
    assert_eq!(health.documents_loaded, Some(42));
}

#[tokio::test]
async fn test_stats_with_and_without_source_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_documents": 42,
            "unique_sources": 7
        })))
        .mount(&server)
        .await;

    let stats = backend_for(&server).stats().await.unwrap();

    assert_eq!(stats.total_documents, 42);
    assert_eq!(stats.unique_sources, 7);
    assert!(stats.sources.is_empty());
}

#[tokio::test]
async fn test_startup_loads_fill_status_bar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "database_connected": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_documents": 42,
            "unique_sources": 7
        })))
        .mount(&server)
        .await;

    let backend: Arc<dyn Backend> = Arc::new(backend_for(&server));
    let mut app = App::new(UiCopy::default());
    for action in dispatch::load_startup(backend).await {
        update(&mut app, action);
    }

    assert_eq!(app.status_summary(), "● Connected | 42 documents loaded | 7 sources");
}

#[tokio::test]
async fn test_stats_failure_leaves_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "database_connected": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(503).set_body_string("database offline"))
        .mount(&server)
        .await;

    let backend: Arc<dyn Backend> = Arc::new(backend_for(&server));
    let mut app = App::new(UiCopy::default());
    for action in dispatch::load_startup(backend).await {
        update(&mut app, action);
    }

    assert!(app.is_connected());
    assert_eq!(app.document_count(), 0);
    assert_eq!(app.source_count(), 0);
}

// ============================================================================
// Query endpoint
// ============================================================================

#[tokio::test]
async fn test_query_sends_question_and_keeps_source_order() {
    let server = MockServer::start().await;
    mount_catalog_answer(&server).await;

    let answer = backend_for(&server)
        .query("What tractors do you sell?")
        .await
        .unwrap();

    assert_eq!(answer.answer, "We sell X and Y.");
    let names: Vec<&str> = answer.sources.iter().map(|s| s.source.as_str()).collect();
    assert_eq!(names, vec!["catalog.pdf", "price-list.xlsx"]);
}

#[tokio::test]
async fn test_query_missing_sources_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "No documents matched."
        })))
        .mount(&server)
        .await;

    let answer = backend_for(&server).query("anything").await.unwrap();

    assert!(answer.sources.is_empty());
}

#[tokio::test]
async fn test_query_http_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let result = backend_for(&server).query("hello").await;

    match result {
        Err(ApiError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_query_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = backend_for(&server).query("hello").await;

    assert!(matches!(result, Err(ApiError::Parse(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_query_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "answer": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri(), Some(Duration::from_millis(100))).unwrap();
    let result = backend.query("hello").await;

    assert_eq!(result, Err(ApiError::Timeout));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let backend = HttpBackend::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();

    let result = backend.health().await;

    assert!(matches!(result, Err(ApiError::Network(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_trailing_slash_base_url() {
    let server = MockServer::start().await;
    mount_catalog_answer(&server).await;

    let backend = HttpBackend::new(&format!("{}/", server.uri()), None).unwrap();
    let answer = backend.query("What tractors do you sell?").await;

    assert!(answer.is_ok());
}

// ============================================================================
// Full round trip through the reducer
// ============================================================================

#[tokio::test]
async fn test_submit_round_trip_appends_reply_with_citations() {
    let server = MockServer::start().await;
    mount_catalog_answer(&server).await;

    let backend = backend_for(&server);
    let mut app = App::new(UiCopy::default());
    let effect =
        dispatch::submit_and_wait(&mut app, &backend, "What tractors do you sell?".to_string())
            .await;

    assert_eq!(effect, Effect::ScrollToLatest);
    assert!(!app.in_flight);
    assert_eq!(app.transcript.len(), 2);

    let reply = app.transcript.last().unwrap();
    assert_eq!(reply.role, Role::Assistant);
    let citations: Vec<String> = reply.sources.iter().map(|s| s.citation()).collect();
    assert_eq!(
        citations,
        vec![
            "catalog.pdf (relevance: 91%)",
            "price-list.xlsx (relevance: 46%)"
        ]
    );
}

#[tokio::test]
async fn test_submit_round_trip_server_error_becomes_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let mut app = App::new(UiCopy::default());
    dispatch::submit_and_wait(&mut app, &backend, "hello".to_string()).await;

    let reply = app.transcript.last().unwrap();
    assert_eq!(reply.content, FALLBACK_REPLY);
    assert!(reply.sources.is_empty());
    assert!(!app.in_flight);
}
