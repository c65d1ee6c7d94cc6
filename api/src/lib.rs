//! HTTP layer for the RAG-Stocks backend.
//!
//! Routes:
//! - `GET  /`          — liveness greeting
//! - `GET  /health`    — downstream dependency probes
//! - `POST /rag/query` — retrieval-augmented question answering

use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;
use crate::middleware_layer::json_error_mapper::json_error_mapper;
use crate::routes::{
    health::health_route::health, query::query_route::query_question, root_route::root,
};

/// Builds the application router over already-constructed state.
///
/// Split out from [`start`] so tests can drive the router directly.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/rag/query", post(query_question))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Constructs state from the environment and serves the API.
///
/// Binds to `API_ADDRESS` (default `0.0.0.0:8000`) and shuts down
/// gracefully on Ctrl+C.
///
/// # Errors
/// Returns [`AppError`] on misconfiguration, bind failure, or a fatal
/// server error.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    info!(address = %host_url, "RAG-Stocks API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
