//! Core data models used by the library.

use serde_json::Value;

/// A single retrieval hit: similarity score, document text, and metadata.
///
/// `content` is projected from the `content` payload field; everything
/// else in the payload is opaque source metadata owned by the indexer.
#[derive(Clone, Debug)]
pub struct DocumentHit {
    pub score: f32,
    pub content: String,
    pub source: Option<String>,
    pub payload: Value,
}

/// Exact-equality metadata filter applied at retrieval time.
#[derive(Clone, Debug)]
pub struct DocFilter {
    /// Exact match on a field, e.g. `("ticker", "AAPL")`.
    pub equals: Vec<(String, Value)>,
}
