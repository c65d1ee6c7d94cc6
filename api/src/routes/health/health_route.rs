//! GET /health — downstream dependency probes.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::warn;

use crate::{
    core::app_state::AppState,
    routes::health::health_response::{HealthResponse, StoreHealth},
};

/// Handler: GET /health
///
/// Always answers 200; each probe reports its own `ok` flag so load
/// balancers and dashboards can inspect partial degradation.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let llm = state.profiles.health_all().await;

    let vector_store = match state.store.healthz().await {
        Ok(()) => StoreHealth {
            collection: state.store.collection().to_string(),
            ok: true,
            message: "reachable".into(),
        },
        Err(err) => {
            warn!(error = %err, "vector store health probe failed");
            StoreHealth {
                collection: state.store.collection().to_string(),
                ok: false,
                message: err.to_string(),
            }
        }
    };

    Json(HealthResponse { llm, vector_store })
}
