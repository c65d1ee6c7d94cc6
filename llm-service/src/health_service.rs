//! Health checks for OpenAI-compatible backends.
//!
//! Probe: `GET {endpoint}/v1/models` with Bearer auth. The returned
//! [`HealthStatus`] is JSON-serializable and suitable for a `/health`
//! endpoint. [`HealthService::check`] is resilient and never fails
//! (errors mapped to `ok = false`); [`HealthService::try_probe`]
//! returns a strict `Result`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::{HealthError, HttpError, LlmError, make_snippet};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g. "OpenAiCompatible").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier relevant to the probe.
    pub model: Option<String>,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    #[inline]
    fn ok(cfg: &LlmModelConfig, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: Some(cfg.model.clone()),
            ok: true,
            latency_ms,
            message: message.into(),
        }
    }

    #[inline]
    fn fail(cfg: &LlmModelConfig, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: Some(cfg.model.clone()),
            ok: false,
            latency_ms,
            message: message.into(),
        }
    }
}

/// A health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds).
    ///
    /// # Errors
    /// Returns [`LlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self { client })
    }

    /// Checks health for a single LLM config.
    ///
    /// This method is **resilient**: it never returns an error. Any
    /// failure is converted to `HealthStatus { ok: false, .. }`, which
    /// is convenient for a `/health` endpoint.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let started = Instant::now();
        match self.try_probe(cfg).await {
            Ok(()) => HealthStatus::ok(cfg, started.elapsed().as_millis(), "reachable"),
            Err(err) => {
                warn!(
                    endpoint = %cfg.endpoint,
                    model = %cfg.model,
                    error = %err,
                    "health probe failed"
                );
                HealthStatus::fail(cfg, started.elapsed().as_millis(), err.to_string())
            }
        }
    }

    /// Strict probe: `GET {endpoint}/v1/models` must answer 2xx.
    ///
    /// # Errors
    /// - [`HealthError::InvalidEndpoint`] for a malformed endpoint
    /// - [`HealthError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for connectivity failures
    pub async fn try_probe(&self, cfg: &LlmModelConfig) -> Result<(), LlmError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(HealthError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }

        let url = format!("{}/v1/models", endpoint.trim_end_matches('/'));
        let mut req = self.client.get(&url);
        if let Some(key) = &cfg.api_key {
            req = req.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet: make_snippet(&text),
            })
            .into());
        }

        Ok(())
    }
}
