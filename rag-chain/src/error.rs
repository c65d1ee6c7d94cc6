//! Typed error for the rag-chain crate.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    /// The question was empty after trimming.
    #[error("question must not be empty")]
    InvalidQuestion,

    /// The embedding call failed.
    #[error("embedding failed: {0}")]
    Embedding(#[source] llm_service::LlmError),

    /// The vector-store search failed.
    #[error("retrieval failed: {0}")]
    Retrieval(#[source] vector_store::StoreError),

    /// The completion call failed or returned an unusable answer.
    #[error("generation failed: {0}")]
    Generation(#[source] llm_service::LlmError),

    /// The whole pipeline exceeded the per-request deadline.
    #[error("request deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}
