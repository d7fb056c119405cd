//! Explicit presence and type predicates over raw JSON.
//!
//! The storage layer enforces no schema, so validators probe blobs field
//! by field. A field counts as *present* when its key exists with a
//! non-null value; `0` and `""` are present. This keeps presence checks
//! from conflating falsy values with missing data.

use serde_json::Value;

/// `true` when the value exists and is not JSON `null`.
pub fn present(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}

/// Fetch a field, treating `null` as absent. Returns `None` when the
/// container is not an object.
pub fn field<'a>(container: &'a Value, key: &str) -> Option<&'a Value> {
    container.get(key).filter(|v| !v.is_null())
}

/// Read a value as a finite number; rejects non-numeric and non-finite.
pub fn as_finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Fetch a field as a finite number.
pub fn number_field(container: &Value, key: &str) -> Option<f64> {
    field(container, key).and_then(as_finite_number)
}

/// Fetch a field as a string slice.
pub fn str_field<'a>(container: &'a Value, key: &str) -> Option<&'a str> {
    field(container, key).and_then(Value::as_str)
}

/// Fetch a field as epoch milliseconds (any finite number, truncated).
pub fn ms_field(container: &Value, key: &str) -> Option<i64> {
    number_field(container, key).map(|n| n as i64)
}

/// Render a raw value for a finding message: strings without quotes,
/// everything else as compact JSON.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
