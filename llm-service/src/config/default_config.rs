//! Default LLM configs loaded strictly from environment variables.
//!
//! Convenience constructors for [`LlmModelConfig`], one per profile:
//!
//! - **Chat**      → answer generation (deterministic, temperature 0)
//! - **Embedding** → query embedding generation
//!
//! Both profiles target the same OpenAI-compatible endpoint, matching
//! the hosted deployment this backend is built for.
//!
//! # Environment variables
//!
//! - `LLM_ENDPOINT`    = API base URL (mandatory)
//! - `LLM_API_KEY`     = bearer token (mandatory)
//! - `LLM_MODEL`       = chat/completion model (mandatory)
//! - `EMBEDDING_MODEL` = embedding model (mandatory)
//! - `LLM_MAX_TOKENS`  = optional max tokens (u32)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{LlmError, env_opt_u32, must_env, validate_http_endpoint},
};

/// Resolves the API endpoint strictly from environment.
///
/// # Errors
///
/// - [`ConfigError::MissingVar`](crate::error_handler::ConfigError::MissingVar)
///   if `LLM_ENDPOINT` is missing
/// - [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError::InvalidFormat)
///   if it is not an http(s) URL
fn llm_endpoint() -> Result<String, LlmError> {
    let endpoint = must_env("LLM_ENDPOINT")?;
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;
    Ok(endpoint)
}

/// Constructs the **chat** profile config.
///
/// Completions are pinned at `temperature = 0.0` so repeated questions
/// over the same context produce the lowest-variance answers.
///
/// # Env
/// - `LLM_MODEL` (required)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.0)`
/// - `timeout_secs = Some(60)`
pub fn config_chat() -> Result<LlmModelConfig, LlmError> {
    let endpoint = llm_endpoint()?;
    let api_key = must_env("LLM_API_KEY")?;
    let model = must_env("LLM_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAiCompatible,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs the **embedding** profile config.
///
/// # Env
/// - `EMBEDDING_MODEL` (required)
///
/// # Defaults
/// - `max_tokens = None`
/// - `timeout_secs = Some(30)`
pub fn config_embedding() -> Result<LlmModelConfig, LlmError> {
    let endpoint = llm_endpoint()?;
    let api_key = must_env("LLM_API_KEY")?;
    let model = must_env("EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAiCompatible,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(30),
    })
}
