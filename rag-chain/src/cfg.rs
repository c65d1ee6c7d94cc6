//! Runtime configuration loaded from environment variables.

use serde_json::Value;
use vector_store::DocFilter;

/// Retrieval and generation knobs for the chain. All fields have
/// defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    /// Top-K candidates fetched from the vector store.
    pub top_k: u64,
    /// Character budget for the context block of the prompt.
    pub max_context_chars: usize,
    /// Deadline covering embed + retrieve + generate, in seconds.
    pub request_timeout_secs: u64,
    /// Optional metadata filter applied at retrieval.
    pub filter: Option<DocFilter>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            max_context_chars: 6_000,
            request_timeout_secs: 30,
            filter: None,
        }
    }
}

impl ChainConfig {
    /// Build from environment variables with sensible defaults.
    ///
    /// - `RAG_TOP_K` (default 4)
    /// - `RAG_MAX_CONTEXT_CHARS` (default 6000)
    /// - `RAG_REQUEST_TIMEOUT_SECS` (default 30)
    /// - `RAG_FILTER_KEY` / `RAG_FILTER_VALUE` (optional equality filter)
    pub fn from_env() -> Self {
        let filter = std::env::var("RAG_FILTER_KEY")
            .ok()
            .and_then(|k| {
                std::env::var("RAG_FILTER_VALUE")
                    .ok()
                    .map(|v| (k, as_json(v)))
            })
            .map(|(k, v)| DocFilter {
                equals: vec![(k, v)],
            });

        Self {
            top_k: parse("RAG_TOP_K", 4),
            max_context_chars: parse("RAG_MAX_CONTEXT_CHARS", 6_000usize),
            request_timeout_secs: parse("RAG_REQUEST_TIMEOUT_SECS", 30),
            filter,
        }
    }
}

fn as_json(s: String) -> Value {
    serde_json::from_str::<Value>(&s).unwrap_or(Value::String(s))
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = ChainConfig::default();
        assert_eq!(cfg.top_k, 4);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert!(cfg.filter.is_none());
    }

    #[test]
    fn filter_values_parse_as_json_scalars() {
        assert_eq!(as_json("42".into()), Value::from(42));
        assert_eq!(as_json("true".into()), Value::from(true));
        assert_eq!(as_json("AAPL".into()), Value::from("AAPL"));
    }
}
