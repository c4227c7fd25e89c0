//! Recursive merging of JSON objects.

use serde_json::{Map, Value};

/// Returns `mapping` with each of `updates` merged in, in order.
///
/// Keys whose values are objects on both sides are merged recursively; any
/// other value from an update replaces the existing one. The inputs are not
/// modified.
pub fn deep_update(mapping: &Map<String, Value>, updates: &[&Map<String, Value>]) -> Map<String, Value> {
    let mut merged = mapping.clone();
    for update in updates {
        for (key, value) in *update {
            let replacement = match (merged.get(key), value) {
                (Some(Value::Object(existing)), Value::Object(incoming)) => {
                    Value::Object(deep_update(existing, &[incoming]))
                }
                _ => value.clone(),
            };
            merged.insert(key.clone(), replacement);
        }
    }
    merged
}

/// Position, in insertion order, of the first key whose value equals `value`.
pub fn value_to_index(mapping: &Map<String, Value>, value: &Value) -> Option<usize> {
    mapping.values().position(|v| v == value)
}
