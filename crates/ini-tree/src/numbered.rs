//! Folding of numbered tables into arrays.

use serde_json::Value;

/// Recursively replace every non-empty object whose keys are all unsigned
/// integers with an array ordered by key value.
///
/// Gaps are closed up: `{"0": a, "5": b}` becomes `[a, b]`.
pub fn number_keys_to_array(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if !map.is_empty() && map.keys().all(|k| is_index(k)) {
                let mut entries: Vec<(u64, Value)> = map
                    .into_iter()
                    .filter_map(|(k, v)| k.parse::<u64>().ok().map(|i| (i, number_keys_to_array(v))))
                    .collect();
                entries.sort_by_key(|(i, _)| *i);
                Value::Array(entries.into_iter().map(|(_, v)| v).collect())
            } else {
                Value::Object(
                    map.into_iter()
                        .map(|(k, v)| (k, number_keys_to_array(v)))
                        .collect(),
                )
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(number_keys_to_array).collect()),
        other => other,
    }
}

fn is_index(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) && key.parse::<u64>().is_ok()
}
