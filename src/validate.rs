//! Value validation over `serde_json::Value`
//!
//! Length checks measure whatever makes sense for the value: the numeric
//! magnitude of numbers, character count of strings, element count of
//! arrays. Values with no sensible measure yield `None`.

use serde_json::Value;

use crate::error::ToolError;
use crate::patterns;

/// The measurable size of a value, if it has one.
pub fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        _ => None,
    }
}

/// Whether a value counts as present. Booleans always do, strings, arrays
/// and objects must be non-empty, null never does.
pub fn validate_required(value: &Value) -> bool {
    match value {
        Value::Bool(_) | Value::Number(_) => true,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Null => false,
    }
}

pub fn validate_max_length(value: &Value, max: f64) -> Option<bool> {
    measure(value).map(|size| size <= max)
}

pub fn validate_min_length(value: &Value, min: f64) -> Option<bool> {
    measure(value).map(|size| size >= min)
}

pub fn validate_length(value: &Value, length: f64) -> Option<bool> {
    measure(value).map(|size| size == length)
}

/// Whether the value's measure falls within `min..=max`. Unmeasurable values
/// fail.
pub fn validate_size(value: &Value, min: f64, max: f64) -> bool {
    validate_min_length(value, min).unwrap_or(false)
        && validate_max_length(value, max).unwrap_or(false)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Match a value against a pattern, given either as a preset name or as a
/// regex source (surrounding slashes tolerated).
pub fn validate_regex(value: &Value, pattern: &str) -> Result<bool, ToolError> {
    let text = value_text(value);
    if let Some(preset) = patterns::preset(pattern) {
        return Ok(preset.is_match(&text));
    }
    let regex = regex::Regex::new(pattern.trim_matches('/'))?;
    Ok(regex.is_match(&text))
}

/// Whether the value is a number or a string that parses as one in full.
pub fn validate_number(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_accepts_booleans_and_non_empty_collections() {
        assert!(validate_required(&json!(true)));
        assert!(validate_required(&json!(false)));
        assert!(validate_required(&json!("text")));
        assert!(validate_required(&json!(0)));
        assert!(validate_required(&json!([1])));
        assert!(validate_required(&json!({"a": 1})));

        assert!(!validate_required(&json!("")));
        assert!(!validate_required(&json!([])));
        assert!(!validate_required(&json!({})));
        assert!(!validate_required(&json!(null)));
    }

    #[test]
    fn length_checks_measure_strings_arrays_and_numbers() {
        assert_eq!(validate_max_length(&json!("abc"), 5.0), Some(true));
        assert_eq!(validate_max_length(&json!("abcdef"), 5.0), Some(false));
        assert_eq!(validate_max_length(&json!(4), 5.0), Some(true));
        assert_eq!(validate_max_length(&json!([1, 2, 3]), 2.0), Some(false));
        assert_eq!(validate_max_length(&json!(null), 5.0), None);

        assert_eq!(validate_min_length(&json!("abc"), 2.0), Some(true));
        assert_eq!(validate_min_length(&json!(""), 0.0), Some(true));
        assert_eq!(validate_min_length(&json!(1), 2.0), Some(false));

        assert_eq!(validate_length(&json!("abc"), 3.0), Some(true));
        assert_eq!(validate_length(&json!([1, 2]), 3.0), Some(false));
        assert_eq!(validate_length(&json!(true), 1.0), None);
    }

    #[test]
    fn size_check_combines_both_bounds() {
        assert!(validate_size(&json!("abc"), 1.0, 5.0));
        assert!(!validate_size(&json!("abcdef"), 1.0, 5.0));
        assert!(!validate_size(&json!("a"), 2.0, 5.0));
        assert!(!validate_size(&json!(null), 0.0, 5.0));
    }

    #[test]
    fn regex_check_resolves_presets_and_raw_patterns() {
        assert!(validate_regex(&json!("test@example.com"), "email").unwrap());
        assert!(!validate_regex(&json!("not an email"), "email").unwrap());
        assert!(validate_regex(&json!("abc"), r"/^[a-z]+$/").unwrap());
        assert!(!validate_regex(&json!("ABC"), r"^[a-z]+$").unwrap());
        assert!(validate_regex(&json!(42), "numeric").unwrap());
        assert!(validate_regex(&json!("x"), "([unclosed").is_err());
    }

    #[test]
    fn number_check_is_strict_about_strings() {
        assert!(validate_number(&json!(123)));
        assert!(validate_number(&json!(1.5)));
        assert!(validate_number(&json!("123")));
        assert!(validate_number(&json!(" 12.5 ")));
        assert!(!validate_number(&json!("123abc")));
        assert!(!validate_number(&json!(true)));
        assert!(!validate_number(&json!(null)));
    }
}
