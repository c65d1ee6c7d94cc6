//! Retrieval helpers: low-level vector search and hit projection.

use crate::config::StoreConfig;
use crate::errors::StoreError;
use crate::filters::to_qdrant_filter;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{DocFilter, DocumentHit};

use tracing::trace;

/// Performs a similarity search and projects payloads into [`DocumentHit`]s.
///
/// Qdrant returns hits ordered by similarity score descending; that order
/// is preserved.
///
/// # Errors
/// Returns `StoreError::Qdrant` on client failures.
pub async fn search_documents(
    cfg: &StoreConfig,
    client: &QdrantFacade,
    query_vector: Vec<f32>,
    top_k: u64,
    filter: Option<&DocFilter>,
) -> Result<Vec<DocumentHit>, StoreError> {
    trace!(
        "retrieve::search_documents top_k={top_k} filter={}",
        filter.is_some()
    );

    let qfilter = filter.map(to_qdrant_filter);
    let raw = client
        .search(query_vector, top_k, qfilter, cfg.exact_search)
        .await?;

    Ok(hits_from_payloads(raw))
}

/// Projects `(score, payload)` tuples into typed hits.
///
/// `content` comes from the `content` payload field; a hit without it
/// projects to an empty string rather than being dropped, so ranks stay
/// aligned with the store's response.
pub(crate) fn hits_from_payloads(raw: Vec<(f32, serde_json::Value)>) -> Vec<DocumentHit> {
    let mut out = Vec::with_capacity(raw.len());
    for (score, payload) in raw {
        let content = payload
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let source = payload
            .get("source")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        out.push(DocumentHit {
            score,
            content,
            source,
            payload,
        });
    }
    out
}
