//! Response normalization.
//!
//! Two steps with different failure policies: [`parse_reply`] rejects text
//! that is not a JSON object, while [`normalize`] never fails and fills every
//! missing or ill-typed field with its default.

use objscan_core::types::UNKNOWN;
use objscan_core::{AnalysisResult, BoundingBox, DetectedObject, ScanError};
use serde_json::{Map, Value};

/// Parse raw reply text into a JSON object.
pub fn parse_reply(text: &str) -> Result<Value, ScanError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(ScanError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        )));
    }
    Ok(value)
}

/// Parse then normalize in one call.
pub fn normalize_reply(text: &str) -> Result<AnalysisResult, ScanError> {
    parse_reply(text).map(|doc| normalize(&doc))
}

/// Extract objects and warnings from a loosely typed document.
pub fn normalize(doc: &Value) -> AnalysisResult {
    let objects: Vec<DetectedObject> = doc
        .get("objects")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(normalize_object).collect())
        .unwrap_or_default();

    let warnings: Vec<String> = doc
        .get("warnings")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(warning_text).collect())
        .unwrap_or_default();

    AnalysisResult { objects, warnings }
}

/// Normalize one `objects` entry. Non-object entries become all-default.
pub fn normalize_object(entry: &Value) -> DetectedObject {
    let empty = Map::new();
    let fields = entry.as_object().unwrap_or(&empty);
    let bbox = fields.get("box").and_then(Value::as_object).unwrap_or(&empty);

    DetectedObject {
        label: string_or_unknown(fields.get("label")),
        description: string_or_unknown(fields.get("description")),
        confidence: coerce_f64(fields.get("confidence")),
        bbox: BoundingBox {
            x: coerce_f64(bbox.get("x")),
            y: coerce_f64(bbox.get("y")),
            w: coerce_f64(bbox.get("w")),
            h: coerce_f64(bbox.get("h")),
        },
    }
}

fn string_or_unknown(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Coerce a JSON value to a finite float, defaulting to `0.0`.
///
/// Accepts numbers, numeric strings, and booleans.
pub fn coerce_f64(value: Option<&Value>) -> f64 {
    let coerced = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    coerced.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// `null` entries carry no message and are dropped; other non-strings are
/// kept as compact JSON.
fn warning_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
