//! The recursive presence rule gating optional card fields.
//!
//! A field is only worth printing if it carries actual content. The rule
//! is recursive over JSON shapes: whitespace-only strings, empty
//! sequences, and sequences/maps of absent values all count as absent.

use serde_json::Value;

/// Whether a value has renderable content.
///
/// - `Null` is absent.
/// - A string is present iff it has non-whitespace content.
/// - An array is present iff any element is present.
/// - An object is present iff any value is present.
/// - Numbers and booleans are always present.
pub fn present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(present),
        Value::Object(map) => map.values().any(present),
        _ => true,
    }
}

/// The string specialization of [`present`]: `Some` with non-whitespace
/// content.
pub fn present_str(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}
