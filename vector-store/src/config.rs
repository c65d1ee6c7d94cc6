//! Runtime and collection configuration.

use crate::errors::StoreError;

/// Configuration for document retrieval.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl StoreConfig {
    /// Creates a sane default config for a given Qdrant endpoint and collection name.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            exact_search: false,
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(StoreError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = StoreConfig::new_default("http://localhost:6334", "stock_docs");
        assert!(cfg.validate().is_ok());
        assert!(!cfg.exact_search);
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut cfg = StoreConfig::new_default("", "stock_docs");
        assert!(cfg.validate().is_err());

        cfg = StoreConfig::new_default("http://localhost:6334", "  ");
        assert!(cfg.validate().is_err());
    }
}
