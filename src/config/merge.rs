//! Config merge logic
//!
//! All merges here are top-level and copy-based:
//! - Keys from the later layer replace keys from the earlier one
//! - Nested objects and arrays are replaced whole, never combined
//! - Key order follows first insertion

use serde_json::{Map, Value};

/// Overlay `top` onto `base`. Keys in `top` win.
pub fn overlay(mut base: Map<String, Value>, top: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in top {
        base.insert(key, value);
    }
    base
}

/// Overlay layers in order (first is base, last has highest precedence)
pub fn overlay_layers(layers: Vec<Map<String, Value>>) -> Map<String, Value> {
    layers.into_iter().fold(Map::new(), overlay)
}

/// Add every key of `fallback` that `entry` does not already have.
pub fn fill_missing(mut entry: Map<String, Value>, fallback: &Map<String, Value>) -> Map<String, Value> {
    for (key, value) in fallback {
        if !entry.contains_key(key) {
            entry.insert(key.clone(), value.clone());
        }
    }
    entry
}
