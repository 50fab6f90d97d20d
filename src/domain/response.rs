//! Classifier response normalization.
//!
//! Hosted inference endpoints answer `[[{label, score}, ...]]` (one inner list
//! per input, classes sorted by score). A bare object and a flat list are
//! accepted as fallbacks.

use serde_json::Value;

use crate::domain::entities::ClassificationResult;
use crate::domain::error::AnalysisError;

/// Deepest list nesting searched for a prediction object.
const MAX_LIST_DEPTH: usize = 2;

const LABEL_FIELD: &str = "label";
const SCORE_FIELD: &str = "score";

/// Find the first object carrying both `label` and `score`, searching list
/// elements in order.
pub fn locate_prediction(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    locate_at_depth(value, 0)
}

fn locate_at_depth(value: &Value, depth: usize) -> Option<&serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) if map.contains_key(LABEL_FIELD) && map.contains_key(SCORE_FIELD) => {
            Some(map)
        }
        Value::Array(items) if depth < MAX_LIST_DEPTH => items
            .iter()
            .find_map(|item| locate_at_depth(item, depth + 1)),
        _ => None,
    }
}

/// Turn a successful response body into a classification result.
pub fn parse_prediction(body: &str) -> Result<ClassificationResult, AnalysisError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::UnexpectedShape("empty response body".into()));
    }
    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| AnalysisError::UnexpectedShape(format!("invalid JSON: {e}")))?;
    normalize(&value)
}

/// Normalize an already-decoded response value.
pub fn normalize(value: &Value) -> Result<ClassificationResult, AnalysisError> {
    let prediction = locate_prediction(value).ok_or_else(|| {
        AnalysisError::UnexpectedShape(format!(
            "no object with \"{LABEL_FIELD}\" and \"{SCORE_FIELD}\" in {}",
            describe(value)
        ))
    })?;

    let label = match &prediction[LABEL_FIELD] {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            return Err(AnalysisError::UnexpectedShape(format!(
                "label is not a scalar: {other}"
            )))
        }
    };

    let score = coerce_score(&prediction[SCORE_FIELD]).ok_or_else(|| {
        AnalysisError::UnexpectedShape(format!(
            "score is not a finite number: {}",
            prediction[SCORE_FIELD]
        ))
    })?;

    Ok(ClassificationResult::new(label, score))
}

fn coerce_score(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    score.is_finite().then_some(score)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Extract a human-readable message from an error response body.
///
/// Understands `{"error": "..."}`, `{"error": ["...", "..."]}` and an optional
/// `estimated_time` (model still loading). Anything else is returned trimmed
/// and truncated.
pub fn error_detail(body: &str) -> String {
    const MAX_RAW_CHARS: usize = 200;

    let trimmed = body.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        let message = match map.get("error") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        };
        if let Some(mut message) = message {
            if let Some(secs) = map.get("estimated_time").and_then(Value::as_f64) {
                message.push_str(&format!(" (estimated time: {secs:.0}s)"));
            }
            return message;
        }
    }

    if trimmed.is_empty() {
        return "no details provided".to_string();
    }
    let mut raw: String = trimmed.chars().take(MAX_RAW_CHARS).collect();
    if trimmed.chars().count() > MAX_RAW_CHARS {
        raw.push('…');
    }
    raw
}
