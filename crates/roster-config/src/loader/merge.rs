//! Layer merging.

use serde_json::Value;

/// Apply `layer` on top of `base`.
///
/// Objects merge key by key; arrays and scalars from `layer` replace whatever
/// `base` held at that key.
pub(super) fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
