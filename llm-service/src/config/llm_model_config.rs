use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// One instance describes one profile (chat or embedding): which backend
/// to call, which model to request, and the sampling/transport knobs.
///
/// # Examples
///
/// ```
/// use llm_service::config::llm_model_config::LlmModelConfig;
/// use llm_service::config::llm_provider::LlmProvider;
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAiCompatible,
///     model: "gpt-4o-mini".to_string(),
///     endpoint: "https://models.example.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: Some(1024),
///     temperature: Some(0.0),
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.model, "gpt-4o-mini");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string (e.g. `"gpt-4o-mini"`).
    pub model: String,

    /// API base URL (the `/v1/...` suffix is appended by the client).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 = deterministic).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
