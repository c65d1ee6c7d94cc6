/// Represents the provider (backend) used for LLM inference.
///
/// The stock dashboard speaks the OpenAI REST dialect exclusively: the
/// hosted endpoint serves both chat completions and embeddings behind
/// `/v1/*` routes. Additional backends (e.g. a local runtime) can be
/// added by extending this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Any service implementing the OpenAI REST API surface.
    OpenAiCompatible,
}
