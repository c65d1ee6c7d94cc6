//! Filter conversion to Qdrant `Filter`.
//!
//! Currently supports exact equality on scalar fields (`String`, `Number`, `Bool`).

use crate::record::DocFilter;
use qdrant_client::qdrant::{Condition, FieldCondition, Filter, Match, condition::ConditionOneOf};
use tracing::debug;

/// Converts [`DocFilter`] to a Qdrant [`Filter`].
///
/// Supported equality kinds:
/// - `String` → `Keyword`
/// - `Number` → `Integer`
/// - `Bool`   → `Boolean`
pub fn to_qdrant_filter(f: &DocFilter) -> Filter {
    debug!("filters::to_qdrant_filter equals={}", f.equals.len());

    let mut must: Vec<Condition> = Vec::new();

    for (field, val) in &f.equals {
        let m = match val {
            serde_json::Value::String(s) => Match {
                match_value: Some(qdrant_client::qdrant::r#match::MatchValue::Keyword(
                    s.clone(),
                )),
            },
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Match {
                        match_value: Some(qdrant_client::qdrant::r#match::MatchValue::Integer(i)),
                    }
                } else {
                    continue;
                }
            }
            serde_json::Value::Bool(b) => Match {
                match_value: Some(qdrant_client::qdrant::r#match::MatchValue::Boolean(*b)),
            },
            _ => continue, // skip unsupported types
        };

        must.push(Condition {
            condition_one_of: Some(ConditionOneOf::Field(FieldCondition {
                key: field.clone(),
                r#match: Some(m),
                ..Default::default()
            })),
        });
    }

    Filter {
        must,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_equalities_become_must_conditions() {
        let f = DocFilter {
            equals: vec![
                ("ticker".into(), json!("AAPL")),
                ("year".into(), json!(2024)),
                ("archived".into(), json!(false)),
            ],
        };
        let qf = to_qdrant_filter(&f);
        assert_eq!(qf.must.len(), 3);
        assert!(qf.should.is_empty());
    }

    #[test]
    fn unsupported_value_kinds_are_skipped() {
        let f = DocFilter {
            equals: vec![
                ("tags".into(), json!(["a", "b"])),
                ("ratio".into(), json!(0.5)),
                ("ticker".into(), json!("MSFT")),
            ],
        };
        let qf = to_qdrant_filter(&f);
        // Arrays and non-integer numbers have no equality mapping.
        assert_eq!(qf.must.len(), 1);
    }
}
