//! POST /rag/query — answers a question through the RAG chain.

use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use rag_chain::ChainError;
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::query::query_request::{QueryRequest, QueryResponse, SourceItem},
};

/// Handler: POST /rag/query
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/rag/query \
///   -H 'content-type: application/json' \
///   -d '{"query":"What is the outlook for AAPL?"}'
/// ```
pub async fn query_question(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<QueryRequest>,
) -> AppResult<Json<QueryResponse>> {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    // Validate before anything leaves the process.
    let question = body.query.trim();
    if question.is_empty() {
        return Err(AppError::InvalidInput("query must not be empty".into()));
    }

    debug!(
        request_id = %request_id,
        question_len = question.len(),
        "rag query: start"
    );

    match state.chain.answer(question).await {
        Ok(qa) => {
            debug!(
                request_id = %request_id,
                sources = qa.sources.len(),
                "rag query: success"
            );

            let sources = state
                .include_sources
                .then(|| qa.sources.iter().map(SourceItem::from).collect());

            Ok(Json(QueryResponse {
                answer: qa.answer,
                sources,
            }))
        }
        Err(ChainError::InvalidQuestion) => {
            Err(AppError::InvalidInput("query must not be empty".into()))
        }
        Err(err) => {
            // Full cause stays server-side; the caller gets the generic message.
            error!(
                request_id = %request_id,
                error = %err,
                "rag query: chain failed"
            );
            Err(AppError::Chain(err))
        }
    }
}
