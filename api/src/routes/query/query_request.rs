use rag_chain::SourceDoc;
use serde::{Deserialize, Serialize};

/// Request payload for /rag/query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Natural language question.
    pub query: String,
}

/// Response payload for /rag/query.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// Final model answer (plain text).
    pub answer: String,
    /// Retrieved-source descriptors; serialized only when source
    /// surfacing is enabled for the deployment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceItem>>,
}

/// Compact descriptor of one retrieved document.
#[derive(Debug, Serialize)]
pub struct SourceItem {
    pub score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Short preview of the chunk that was given to the model.
    pub preview: String,
}

impl From<&SourceDoc> for SourceItem {
    fn from(doc: &SourceDoc) -> Self {
        Self {
            score: doc.score,
            source: doc.source.clone(),
            preview: doc.preview.clone(),
        }
    }
}
