//! Public API types re-used by external crates (e.g. the HTTP layer).

use vector_store::DocumentHit;

/// A compact descriptor of a document that was fed to the model.
#[derive(Clone, Debug)]
pub struct SourceDoc {
    pub score: f32,
    pub source: Option<String>,
    /// Short preview of the content given to the model.
    pub preview: String,
}

impl SourceDoc {
    /// Builds a descriptor from a retrieval hit, clamping the preview.
    pub fn from_hit(hit: &DocumentHit) -> Self {
        Self {
            score: hit.score,
            source: hit.source.clone(),
            preview: clamp_preview(&hit.content, 240),
        }
    }
}

/// Final answer together with descriptors of the context passed to the model.
#[derive(Clone, Debug)]
pub struct ChainAnswer {
    pub answer: String,
    pub sources: Vec<SourceDoc>,
}

fn clamp_preview(s: &str, max: usize) -> String {
    let t = s.trim();
    if t.len() <= max {
        return t.to_string();
    }
    let mut end = max;
    while end > 0 && !t.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &t[..end])
}
