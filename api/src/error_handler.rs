use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rag_chain::ChainError;
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Llm(#[from] llm_service::LlmError),

    #[error(transparent)]
    Store(#[from] vector_store::StoreError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request handling ---
    /// The request payload failed validation; message is safe to show.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The chain failed. Display is a fixed generic message — the real
    /// cause stays in server-side logs and the `source` chain.
    #[error("failed to answer the question")]
    Chain(#[source] ChainError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::Llm(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // upstream failure
            AppError::Chain(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Failure body: a single string field, safe for direct display.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
