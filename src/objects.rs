//! Plain-object helpers over `serde_json::Value`

use serde_json::Value;

/// Whether the value is a JSON object (not an array or scalar).
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

/// Number of properties; 0 for non-objects.
pub fn count_props(value: &Value) -> usize {
    value.as_object().map_or(0, |map| map.len())
}

/// Whether the value is an object with no properties.
pub fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|map| map.is_empty())
}

/// Merge `patch` into `base` recursively.
///
/// Nested objects merge key by key; any other value in the patch replaces the
/// base value. In strict mode keys absent from the base are dropped. An empty
/// or non-object patch returns the base unchanged.
pub fn merge(base: &Value, patch: &Value, strict: bool) -> Value {
    let (Some(base_map), Some(patch_map)) = (base.as_object(), patch.as_object()) else {
        return base.clone();
    };
    if patch_map.is_empty() {
        return base.clone();
    }

    let mut merged = base_map.clone();
    for (key, value) in patch_map {
        if strict && !merged.contains_key(key) {
            continue;
        }
        let next = match merged.get(key) {
            Some(existing) if existing.is_object() && value.is_object() => {
                merge(existing, value, strict)
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    Value::Object(merged)
}
