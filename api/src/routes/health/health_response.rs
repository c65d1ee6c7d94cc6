use llm_service::health_service::HealthStatus;
use serde::Serialize;

/// Response payload for /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// One probe per distinct LLM profile.
    pub llm: Vec<HealthStatus>,
    /// Vector-store reachability.
    pub vector_store: StoreHealth,
}

/// Reachability snapshot of the vector store.
#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub collection: String,
    pub ok: bool,
    pub message: String,
}
