use std::sync::Arc;

use llm_service::LlmProfiles;
use rag_chain::{ChainConfig, RagChain};
use vector_store::{DocumentRetriever, StoreConfig, VectorStore};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
///
/// Every client is constructed once at startup and injected here; the
/// handlers only read through `Arc`s, so concurrent requests never
/// mutate shared state.
#[derive(Clone)]
pub struct AppState {
    /// The retrieval-augmented chain answering `/rag/query`.
    pub chain: Arc<RagChain>,
    /// LLM profiles, exposed for `/health` probes.
    pub profiles: Arc<LlmProfiles>,
    /// Vector store, exposed for `/health` probes.
    pub store: Arc<VectorStore>,
    /// Whether `/rag/query` responses carry the retrieved-source list.
    pub include_sources: bool,
}

impl AppState {
    /// Wires explicitly constructed clients into shared state.
    pub fn new(
        chain: Arc<RagChain>,
        profiles: Arc<LlmProfiles>,
        store: Arc<VectorStore>,
        include_sources: bool,
    ) -> Self {
        Self {
            chain,
            profiles,
            store,
            include_sources,
        }
    }

    /// Builds all clients from environment variables.
    ///
    /// # Errors
    /// Returns [`AppError`] when a profile or store config is missing or
    /// malformed; the process should fail to boot in that case.
    pub fn from_env() -> Result<Self, AppError> {
        let profiles = Arc::new(LlmProfiles::from_env()?);

        let store_cfg = StoreConfig {
            qdrant_url: env_or("QDRANT_URL", "http://127.0.0.1:6334"),
            qdrant_api_key: std::env::var("QDRANT_API_KEY").ok(),
            collection: env_or("QDRANT_COLLECTION", "stock_docs"),
            exact_search: env_or("RAG_EXACT_SEARCH", "false") == "true",
        };
        let store = Arc::new(VectorStore::new(store_cfg)?);

        let retriever: Arc<dyn DocumentRetriever> = store.clone();
        let chain = Arc::new(RagChain::new(
            profiles.clone(),
            retriever,
            ChainConfig::from_env(),
        ));

        let include_sources = env_or("RAG_INCLUDE_SOURCES", "false") == "true";

        Ok(Self::new(chain, profiles, store, include_sources))
    }
}

fn env_or(key: &str, dflt: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| dflt.to_string())
}
