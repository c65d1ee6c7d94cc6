//! Object-safe retrieval seam consumed by the RAG chain.

use std::{future::Future, pin::Pin};

use crate::errors::StoreError;
use crate::record::{DocFilter, DocumentHit};

/// Provider interface for document similarity search.
///
/// Implement this trait to plug in another store backend or an in-memory
/// stub for tests. Async is expressed through boxed futures so the trait
/// stays object-safe.
pub trait DocumentRetriever: Send + Sync {
    /// Returns the top-`top_k` documents most similar to `query_vector`,
    /// ordered by similarity score descending.
    fn retrieve<'a>(
        &'a self,
        query_vector: Vec<f32>,
        top_k: u64,
        filter: Option<&'a DocFilter>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DocumentHit>, StoreError>> + Send + 'a>>;
}
