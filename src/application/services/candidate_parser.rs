use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::Candidate;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```(?:json)?").unwrap());

/// Turn the oracle's raw text into a candidate list.
///
/// Well-formed output is a JSON array of `{name, dosage}` objects; anything
/// else collapses to a single fallback candidate carrying the cleaned text,
/// pre-marked as not verified so it skips similarity scoring downstream.
pub fn parse_candidates(raw: &str) -> Vec<Candidate> {
    let cleaned = CODE_FENCE.replace_all(raw, "");
    let cleaned = cleaned.trim();

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Array(items)) => items.iter().map(candidate_from_value).collect(),
        Ok(other) => {
            tracing::warn!(
                value_type = value_type_name(&other),
                "Extraction output parsed as JSON but is not an array, using fallback candidate"
            );
            vec![Candidate::unverified_fallback(cleaned.to_string())]
        }
        Err(error) => {
            tracing::warn!(
                error = %error,
                raw_len = cleaned.len(),
                "Extraction output is not valid JSON, using fallback candidate"
            );
            vec![Candidate::unverified_fallback(cleaned.to_string())]
        }
    }
}

fn candidate_from_value(item: &Value) -> Candidate {
    let name = item
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();
    let dosage = item
        .get("dosage")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();
    Candidate::new(name, dosage)
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
