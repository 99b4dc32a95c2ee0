//! Total accessors over untyped JSON.
//!
//! None of these functions fail: a non-object reads as an empty object, a
//! non-array as an empty array, and a string is only "present" when it is a
//! JSON string with non-blank content.

use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Returns `value[key]`, or `null` when `value` is not an object or lacks the key.
pub fn field<'a>(value: &'a Value, key: &str) -> &'a Value {
    value
        .as_object()
        .and_then(|object| object.get(key))
        .unwrap_or(&NULL)
}

/// Follows a chain of object keys, yielding `null` as soon as a step is missing.
pub fn path<'a>(value: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter().fold(value, |current, key| field(current, key))
}

/// Trimmed string content, or `None` for non-strings and blank strings.
pub fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Every usable string of an array, trimmed. Non-arrays yield nothing.
pub fn text_list(value: &Value) -> Vec<String> {
    items(value).filter_map(text).collect()
}

/// Array elements, or nothing for non-arrays.
pub fn items(value: &Value) -> impl Iterator<Item = &Value> {
    value.as_array().into_iter().flatten()
}

/// Object entries in document order, or nothing for non-objects.
pub fn entries(value: &Value) -> impl Iterator<Item = (&String, &Value)> {
    value.as_object().into_iter().flatten()
}

/// A copy of `value` when it is an object, otherwise `{}`.
pub fn record(value: &Value) -> Value {
    match value {
        Value::Object(_) => value.clone(),
        _ => Value::Object(Map::new()),
    }
}

/// Number of keys when `value` is an object.
pub fn key_count(value: &Value) -> Option<usize> {
    value.as_object().map(Map::len)
}

/// Strings render as themselves; everything else as 2-space indented JSON.
pub fn pretty(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Key used to match tool identifiers regardless of case and padding.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}
