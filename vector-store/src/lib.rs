//! Read-side vector store facade over Qdrant.
//!
//! This crate provides a clean API to retrieve top-K documents for a
//! precomputed query embedding. Documents are owned, chunked, embedded,
//! and written by an external indexing pipeline; this system only reads
//! them. The design is flat and splits responsibilities into focused
//! modules.

mod config;
mod errors;
mod filters;
mod qdrant_facade;
mod record;
mod retrieve;
mod retriever;

pub use config::StoreConfig;
pub use errors::StoreError;
pub use record::{DocFilter, DocumentHit};
pub use retriever::DocumentRetriever;

use std::{future::Future, pin::Pin};

use tracing::trace;

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct VectorStore {
    cfg: StoreConfig,
    client: qdrant_facade::QdrantFacade,
}

impl VectorStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `StoreError::Config` if validation fails or
    /// `StoreError::Qdrant` if client initialization fails.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        trace!("VectorStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    /// The collection this store reads from.
    pub fn collection(&self) -> &str {
        &self.cfg.collection
    }

    /// Performs a similarity search for a ready query vector.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` if the search fails.
    pub async fn search_by_vector(
        &self,
        query_vector: Vec<f32>,
        top_k: u64,
        filter: Option<&DocFilter>,
    ) -> Result<Vec<DocumentHit>, StoreError> {
        trace!("VectorStore::search_by_vector top_k={top_k}");
        retrieve::search_documents(&self.cfg, &self.client, query_vector, top_k, filter).await
    }

    /// Verifies that the server and collection are reachable.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` when the collection is missing or the
    /// server cannot be reached.
    pub async fn healthz(&self) -> Result<(), StoreError> {
        self.client.ping_collection().await
    }
}

impl DocumentRetriever for VectorStore {
    fn retrieve<'a>(
        &'a self,
        query_vector: Vec<f32>,
        top_k: u64,
        filter: Option<&'a DocFilter>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DocumentHit>, StoreError>> + Send + 'a>> {
        Box::pin(self.search_by_vector(query_vector, top_k, filter))
    }
}
