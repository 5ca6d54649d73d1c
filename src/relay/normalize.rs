use serde_json::Value;

use super::error::ExtractionError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Strip markdown code fences and surrounding whitespace from model output.
///
/// Every fence marker is removed wherever it appears; balance is not checked.
pub fn normalize_model_text(text: &str) -> String {
    text.replace(JSON_FENCE, "").replace(FENCE, "").trim().to_string()
}

/// Treat any non-array value as a single row.
pub fn coerce_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        other => vec![other],
    }
}

/// Normalize, parse and coerce the candidate text into rows.
pub fn parse_rows(text: &str) -> Result<Vec<Value>, ExtractionError> {
    let clean = normalize_model_text(text);
    let parsed: Value = serde_json::from_str(&clean).map_err(|e| ExtractionError::Parse {
        reason: e.to_string(),
        raw: text.to_string(),
    })?;
    Ok(coerce_rows(parsed))
}
