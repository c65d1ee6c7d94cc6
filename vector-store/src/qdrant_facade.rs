//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding away the verbose builder pattern and keeping the rest of the
//! application decoupled from `qdrant-client`.

use crate::config::StoreConfig;
use crate::errors::StoreError;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Filter, SearchParamsBuilder, SearchPointsBuilder, Value as QValue,
};
use tracing::{debug, info};

/// A facade over the Qdrant client to keep the rest of the code clean and stable.
pub struct QdrantFacade {
    client: Qdrant,
    pub(crate) collection: String,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Uses the builder-based API of `qdrant-client` and supports
    /// optional API key authentication.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
        })
    }

    /// Verifies that the target collection is reachable.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` when the collection is missing or the
    /// server cannot be reached.
    pub async fn ping_collection(&self) -> Result<(), StoreError> {
        self.client
            .collection_info(&self.collection)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;
        debug!("collection '{}' reachable", self.collection);
        Ok(())
    }

    /// Performs a similarity search in Qdrant.
    ///
    /// Returns `(score, payload)` tuples with results sorted by score.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
        filter: Option<Filter>,
        exact: bool,
    ) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
        info!(
            "Searching in '{}' with top_k={}, exact={}",
            self.collection, top_k, exact
        );

        let mut builder =
            SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true);

        if let Some(f) = filter {
            builder = builder.filter(f);
        }
        if exact {
            builder = builder.params(SearchParamsBuilder::default().exact(true));
        }

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        // Convert raw Qdrant payloads into JSON.
        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result.into_iter() {
            let score = r.score;
            let payload_json = qpayload_to_json(r.payload);
            out.push((score, payload_json));
        }

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
///
/// Unsupported nested objects/arrays are mapped to `Null`.
pub(crate) fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            None => serde_json::Value::Null,
            // For unsupported nested types, fallback to Null for safety.
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::value::Kind;
    use std::collections::HashMap;

    fn qv(kind: Kind) -> QValue {
        QValue { kind: Some(kind) }
    }

    #[test]
    fn payload_scalars_convert_to_json() {
        let mut p = HashMap::new();
        p.insert("content".to_string(), qv(Kind::StringValue("Apple reported strong Q3 earnings.".into())));
        p.insert("year".to_string(), qv(Kind::IntegerValue(2024)));
        p.insert("score_hint".to_string(), qv(Kind::DoubleValue(0.91)));
        p.insert("archived".to_string(), qv(Kind::BoolValue(false)));

        let j = qpayload_to_json(p);
        assert_eq!(
            j.get("content").and_then(|v| v.as_str()),
            Some("Apple reported strong Q3 earnings.")
        );
        assert_eq!(j.get("year").and_then(|v| v.as_i64()), Some(2024));
        assert_eq!(j.get("archived").and_then(|v| v.as_bool()), Some(false));
    }

    #[test]
    fn nested_payload_values_become_null() {
        let mut p = HashMap::new();
        p.insert(
            "nested".to_string(),
            qv(Kind::ListValue(qdrant_client::qdrant::ListValue {
                values: vec![],
            })),
        );
        let j = qpayload_to_json(p);
        assert!(j.get("nested").unwrap().is_null());
    }
}
