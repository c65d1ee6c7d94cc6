//! Endpoint-level tests for the RAG query path.
//!
//! Drives the real router with `tower::ServiceExt::oneshot`, a stub
//! document retriever, and wiremock OpenAI-compatible upstreams.

use std::{future::Future, pin::Pin, sync::Arc};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use api::core::app_state::AppState;
use llm_service::LlmProfiles;
use llm_service::config::llm_model_config::LlmModelConfig;
use llm_service::config::llm_provider::LlmProvider;
use rag_chain::{ChainConfig, RagChain};
use vector_store::{
    DocFilter, DocumentHit, DocumentRetriever, StoreConfig, StoreError, VectorStore,
};

/// In-memory retriever with canned hits.
struct StubRetriever {
    hits: Vec<DocumentHit>,
}

impl DocumentRetriever for StubRetriever {
    fn retrieve<'a>(
        &'a self,
        _query_vector: Vec<f32>,
        _top_k: u64,
        _filter: Option<&'a DocFilter>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DocumentHit>, StoreError>> + Send + 'a>> {
        let hits = self.hits.clone();
        Box::pin(async move { Ok(hits) })
    }
}

fn aapl_hit() -> DocumentHit {
    DocumentHit {
        score: 0.91,
        content: "Apple reported strong Q3 earnings.".to_string(),
        source: Some("news/aapl-q3".into()),
        payload: json!({}),
    }
}

fn test_app(llm_endpoint: &str, hits: Vec<DocumentHit>, include_sources: bool) -> Router {
    let chat = LlmModelConfig {
        provider: LlmProvider::OpenAiCompatible,
        model: "chat-model".into(),
        endpoint: llm_endpoint.into(),
        api_key: Some("k".into()),
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(5),
    };
    let embedding = LlmModelConfig {
        model: "embed-model".into(),
        ..chat.clone()
    };
    let profiles = Arc::new(LlmProfiles::new(chat, embedding).unwrap());

    // Unreachable on purpose: only the /health probe talks to it.
    let store = Arc::new(
        VectorStore::new(StoreConfig::new_default("http://127.0.0.1:1", "stock_docs")).unwrap(),
    );

    let retriever: Arc<dyn DocumentRetriever> = Arc::new(StubRetriever { hits });
    let chain = Arc::new(RagChain::new(
        profiles.clone(),
        retriever,
        ChainConfig::default(),
    ));

    api::router(Arc::new(AppState::new(chain, profiles, store, include_sources)))
}

async fn mount_embedding(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [0.1, 0.2, 0.3]}]
        })))
        .mount(server)
        .await;
}

async fn send_query(app: Router, body: &str) -> (StatusCode, Value) {
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/rag/query")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn question_with_context_yields_answer() {
    let server = MockServer::start().await;
    mount_embedding(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Apple reported strong Q3 earnings."))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "AAPL looks strong after Q3."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), vec![aapl_hit()], false);
    let (status, body) = send_query(app, r#"{"query": "What is the outlook for AAPL?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "AAPL looks strong after Q3.");
    // Source surfacing is off by default.
    assert!(body.get("sources").is_none());
}

#[tokio::test]
async fn sources_are_surfaced_when_enabled() {
    let server = MockServer::start().await;
    mount_embedding(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "grounded answer"}}]
        })))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), vec![aapl_hit()], true);
    let (status, body) = send_query(app, r#"{"query": "AAPL?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sources"][0]["source"], "news/aapl-q3");
    assert_eq!(
        body["sources"][0]["preview"],
        "Apple reported strong Q3 earnings."
    );
}

#[tokio::test]
async fn empty_query_is_rejected_without_downstream_calls() {
    let server = MockServer::start().await;
    // Any upstream traffic at all fails the test.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), vec![aapl_hit()], false);
    let (status, body) = send_query(app, r#"{"query": "   "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid input: query must not be empty");
}

#[tokio::test]
async fn llm_failure_maps_to_generic_error() {
    let server = MockServer::start().await;
    mount_embedding(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("provider exploded"))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), vec![aapl_hit()], false);
    let (status, body) = send_query(app, r#"{"query": "What is the outlook for AAPL?"}"#).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "failed to answer the question");
    // The raw provider text must never leak to the caller.
    assert!(!body.to_string().contains("provider exploded"));
}

#[tokio::test]
async fn malformed_body_yields_json_error() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri(), vec![], false);

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/rag/query")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn concurrent_identical_queries_are_independent() {
    let server = MockServer::start().await;
    mount_embedding(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "same answer"}}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), vec![aapl_hit()], false);
    let body = r#"{"query": "What is the outlook for AAPL?"}"#;

    let (a, b) = tokio::join!(send_query(app.clone(), body), send_query(app, body));
    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    assert_eq!(a.1["answer"], "same answer");
    assert_eq!(b.1["answer"], "same answer");
}

#[tokio::test]
async fn root_greets() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri(), vec![], false);

    let res = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Welcome to the RAG-Stocks API");
}

#[tokio::test]
async fn health_reports_each_dependency() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), vec![], false);
    let res = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["llm"][0]["ok"], true);
    // The test store points at an unreachable port.
    assert_eq!(body["vector_store"]["ok"], false);
    assert_eq!(body["vector_store"]["collection"], "stock_docs");
}
