//! Prompt builder: fixed template with a char-budgeted context block.

use vector_store::DocumentHit;

/// Marker inserted when a successful search returned zero documents,
/// so the model (and anyone reading logs) can see the generation ran
/// without grounding context.
pub const NO_CONTEXT_MARKER: &str = "(no context was retrieved)";

/// Build the user prompt from retrieved context and the question.
///
/// The retrieved documents' content is concatenated in similarity-rank
/// order under a fixed instruction, followed by the question. The
/// context block is compacted into at most `max_context_chars`.
///
/// # Example
/// ```
/// # use rag_chain::prompt::build_prompt;
/// let prompt = build_prompt("How is AAPL doing?", &[], 2000);
/// assert!(prompt.contains("Question: How is AAPL doing?"));
/// ```
pub fn build_prompt(question: &str, hits: &[DocumentHit], max_context_chars: usize) -> String {
    let mut out = String::new();
    out.push_str("Answer the question based only on the following context:\n");

    if hits.is_empty() {
        out.push_str(NO_CONTEXT_MARKER);
        out.push('\n');
    } else {
        let mut budget = max_context_chars;
        for h in hits {
            let text = h.content.trim();
            if text.is_empty() {
                continue;
            }
            if budget == 0 {
                break;
            }
            if text.len() > budget {
                out.push_str(safe_truncate(text, budget));
                out.push_str("\n…\n");
                break;
            }
            out.push_str(text);
            out.push('\n');
            budget = budget.saturating_sub(text.len() + 1);
        }
    }

    out.push_str("\nQuestion: ");
    out.push_str(question.trim());
    out.push('\n');

    out
}

fn safe_truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut end = max;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}
