use serde::Serialize;
use serde_json::Value;

/// Serializes a value into a JSON column value, falling back to null.
pub fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
