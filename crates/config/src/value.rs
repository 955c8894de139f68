// Loose coercions over untrusted JSON values

use serde_json::Value;

/// Truthiness with the semantics the persisted payloads were written against:
/// null, false, 0 and "" are falsy; arrays and objects are always truthy.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Scalar → text. Strings pass through, numbers and bools use their
/// display form, everything else is `None`.
pub(crate) fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerced, trimmed, non-empty text
pub(crate) fn trimmed_string(value: &Value) -> Option<String> {
    coerce_string(value)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
