//! Retrieval-augmented answer chain.
//!
//! Public API: [`RagChain`]. Constructed once at startup with
//! dependency-injected clients, it answers one question per call:
//! embed the question, retrieve top-K context from the vector store,
//! build a fixed prompt, call the chat model at temperature 0, and
//! return the answer together with descriptors of the context used.
//!
//! The whole pipeline runs under a single per-request deadline;
//! expiry drops the in-flight downstream call and surfaces
//! [`ChainError::DeadlineExceeded`].

mod api_types;
mod cfg;
mod error;
pub mod prompt;

pub use api_types::{ChainAnswer, SourceDoc};
pub use cfg::ChainConfig;
pub use error::ChainError;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use llm_service::LlmProfiles;
use vector_store::DocumentRetriever;

/// The orchestration unit composing embedding, retrieval, and generation
/// into one request-scoped operation.
///
/// Holds no per-request state; a single instance is shared across
/// concurrent requests via `Arc`.
pub struct RagChain {
    svc: Arc<LlmProfiles>,
    retriever: Arc<dyn DocumentRetriever>,
    cfg: ChainConfig,
}

impl RagChain {
    /// Creates a chain from already-constructed clients.
    pub fn new(svc: Arc<LlmProfiles>, retriever: Arc<dyn DocumentRetriever>, cfg: ChainConfig) -> Self {
        Self {
            svc,
            retriever,
            cfg,
        }
    }

    /// Answers a natural-language question with retrieved context.
    ///
    /// # Errors
    /// - [`ChainError::InvalidQuestion`] for an empty question (no
    ///   downstream call is made)
    /// - [`ChainError::Embedding`] / [`ChainError::Retrieval`] /
    ///   [`ChainError::Generation`] for downstream failures — a single
    ///   attempt, no retry, no fallback answer
    /// - [`ChainError::DeadlineExceeded`] when the pipeline overruns the
    ///   configured deadline
    pub async fn answer(&self, question: &str) -> Result<ChainAnswer, ChainError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChainError::InvalidQuestion);
        }

        let deadline = Duration::from_secs(self.cfg.request_timeout_secs);
        match tokio::time::timeout(deadline, self.answer_inner(question)).await {
            Ok(res) => res,
            Err(_) => {
                warn!(timeout_secs = deadline.as_secs(), "chain deadline exceeded");
                Err(ChainError::DeadlineExceeded(deadline))
            }
        }
    }

    async fn answer_inner(&self, question: &str) -> Result<ChainAnswer, ChainError> {
        // 1) Embed the question.
        debug!(question_len = question.len(), "embedding question");
        let query_vector = self
            .svc
            .embed(question)
            .await
            .map_err(ChainError::Embedding)?;

        // 2) Top-K similarity search.
        let hits = self
            .retriever
            .retrieve(query_vector, self.cfg.top_k, self.cfg.filter.as_ref())
            .await
            .map_err(ChainError::Retrieval)?;

        if hits.is_empty() {
            // A successful search with zero hits proceeds with an
            // explicitly empty context; the prompt carries a marker so
            // the generation is never silently ungrounded.
            warn!("retrieval returned zero documents; answering without context");
        }

        // 3) Fixed template: context in rank order, then the question.
        let user_prompt = prompt::build_prompt(question, &hits, self.cfg.max_context_chars);

        // 4) Deterministic completion (chat profile runs at temperature 0).
        let answer = self
            .svc
            .generate(&user_prompt, None)
            .await
            .map_err(ChainError::Generation)?;

        info!(
            hits = hits.len(),
            answer_len = answer.len(),
            "chain answered question"
        );

        // 5) Answer plus compact context descriptors.
        let sources = hits.iter().map(SourceDoc::from_hit).collect();
        Ok(ChainAnswer { answer, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{future::Future, pin::Pin};

    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use llm_service::config::llm_model_config::LlmModelConfig;
    use llm_service::config::llm_provider::LlmProvider;
    use vector_store::{DocFilter, DocumentHit, StoreError};

    /// In-memory retriever: canned hits or a canned failure.
    struct StubRetriever {
        result: Result<Vec<DocumentHit>, String>,
    }

    impl StubRetriever {
        fn with_hits(hits: Vec<DocumentHit>) -> Self {
            Self { result: Ok(hits) }
        }

        fn failing(msg: &str) -> Self {
            Self {
                result: Err(msg.to_string()),
            }
        }
    }

    impl DocumentRetriever for StubRetriever {
        fn retrieve<'a>(
            &'a self,
            _query_vector: Vec<f32>,
            _top_k: u64,
            _filter: Option<&'a DocFilter>,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<DocumentHit>, StoreError>> + Send + 'a>>
        {
            let result = match &self.result {
                Ok(hits) => Ok(hits.clone()),
                Err(msg) => Err(StoreError::Qdrant(msg.clone())),
            };
            Box::pin(async move { result })
        }
    }

    fn hit(score: f32, content: &str) -> DocumentHit {
        DocumentHit {
            score,
            content: content.to_string(),
            source: Some("news/aapl-q3".into()),
            payload: json!({}),
        }
    }

    fn profiles(endpoint: &str) -> Arc<LlmProfiles> {
        let chat = LlmModelConfig {
            provider: LlmProvider::OpenAiCompatible,
            model: "chat-model".into(),
            endpoint: endpoint.into(),
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
        Arc::new(LlmProfiles::new(chat, embedding).unwrap())
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

    fn make_chain(server: &MockServer, retriever: StubRetriever, cfg: ChainConfig) -> RagChain {
        RagChain::new(profiles(&server.uri()), Arc::new(retriever), cfg)
    }

    #[tokio::test]
    async fn answers_with_retrieved_context_in_prompt() {
        let server = MockServer::start().await;
        mount_embedding(&server).await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Apple reported strong Q3 earnings."))
            .and(body_string_contains("What is the outlook for AAPL?"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "AAPL looks strong after Q3."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let chain = make_chain(
            &server,
            StubRetriever::with_hits(vec![hit(0.91, "Apple reported strong Q3 earnings.")]),
            ChainConfig::default(),
        );

        let out = chain.answer("What is the outlook for AAPL?").await.unwrap();
        assert_eq!(out.answer, "AAPL looks strong after Q3.");
        assert_eq!(out.sources.len(), 1);
        assert_eq!(out.sources[0].source.as_deref(), Some("news/aapl-q3"));
    }

    #[tokio::test]
    async fn empty_question_makes_no_downstream_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let chain = make_chain(
            &server,
            StubRetriever::with_hits(vec![]),
            ChainConfig::default(),
        );

        let err = chain.answer("   ").await.unwrap_err();
        assert!(matches!(err, ChainError::InvalidQuestion));
    }

    #[tokio::test]
    async fn zero_hits_answers_with_explicit_empty_context() {
        let server = MockServer::start().await;
        mount_embedding(&server).await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains(prompt::NO_CONTEXT_MARKER))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "I have no grounded data on that."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let chain = make_chain(
            &server,
            StubRetriever::with_hits(vec![]),
            ChainConfig::default(),
        );

        let out = chain.answer("anything new?").await.unwrap();
        assert!(out.sources.is_empty());
        assert_eq!(out.answer, "I have no grounded data on that.");
    }

    #[tokio::test]
    async fn retriever_failure_is_retrieval_error() {
        let server = MockServer::start().await;
        mount_embedding(&server).await;

        let chain = make_chain(
            &server,
            StubRetriever::failing("connection refused"),
            ChainConfig::default(),
        );

        let err = chain.answer("question").await.unwrap_err();
        assert!(matches!(err, ChainError::Retrieval(_)));
    }

    #[tokio::test]
    async fn llm_failure_is_generation_error() {
        let server = MockServer::start().await;
        mount_embedding(&server).await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("provider exploded"))
            .mount(&server)
            .await;

        let chain = make_chain(
            &server,
            StubRetriever::with_hits(vec![hit(0.5, "ctx")]),
            ChainConfig::default(),
        );

        let err = chain.answer("question").await.unwrap_err();
        assert!(matches!(err, ChainError::Generation(_)));
    }

    #[tokio::test]
    async fn slow_generation_hits_the_deadline() {
        let server = MockServer::start().await;
        mount_embedding(&server).await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "choices": [{"message": {"content": "too late"}}]
                    }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let cfg = ChainConfig {
            request_timeout_secs: 1,
            ..ChainConfig::default()
        };
        let chain = make_chain(&server, StubRetriever::with_hits(vec![hit(0.5, "ctx")]), cfg);

        let err = chain.answer("question").await.unwrap_err();
        assert!(matches!(err, ChainError::DeadlineExceeded(_)));
    }

    #[tokio::test]
    async fn concurrent_identical_questions_do_not_interfere() {
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

        let chain = Arc::new(make_chain(
            &server,
            StubRetriever::with_hits(vec![hit(0.7, "shared context")]),
            ChainConfig::default(),
        ));

        let (a, b) = tokio::join!(
            chain.answer("What is the outlook for AAPL?"),
            chain.answer("What is the outlook for AAPL?")
        );
        assert_eq!(a.unwrap().answer, "same answer");
        assert_eq!(b.unwrap().answer, "same answer");
    }
}
