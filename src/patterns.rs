//! Compiled validation patterns
//!
//! Each preset comes in up to two flavors: the anchored pattern that accepts
//! a whole valid value, and an `_enforce` pattern that matches the characters
//! to strip from invalid input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ToolError;

pub static ALPHA_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z0-9]+)$").unwrap());
pub static ALPHA_LOWER_ENFORCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]").unwrap());
pub static ALPHA_LOWER_COMMAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9,]+$").unwrap());
pub static ALPHA_LOWER_COMMAS_ENFORCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9,]").unwrap());

pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|.(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .unwrap()
});

// The dot is deliberately unescaped: one arbitrary separator character is
// tolerated between the integer and fraction digits.
pub static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([-+]?[0-9]*.?[0-9]+)$").unwrap());

pub static HOUR_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([01]?[0-9]|2[0-3]):([0-5][0-9])$").unwrap());

pub static MACHINE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z0-9_]+)$").unwrap());
pub static MACHINE_NAME_ENFORCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]").unwrap());

pub static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)$").unwrap());
pub static NUMERIC_ENFORCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^-0-9]+)").unwrap());

pub static TELEPHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^+])([0-9]{8,})$").unwrap());
pub static TELEPHONE_ENFORCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^+0-9]+)").unwrap());

pub static TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}$|^[0-9]{1,2}(:[0-5][0-9]){1,2}$").unwrap());
pub static TIME_ENFORCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9:]$").unwrap());

pub static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(ht|f)tp(s?)://[0-9a-zA-Z]([-.\w]*[0-9a-zA-Z])*(:(0-9)*)*(/?)([a-zA-Z0-9\-.?,'/\\+&amp;%$#_]*)?$",
    )
    .unwrap()
});

/// Look up a preset by its snake_case name.
pub fn preset(name: &str) -> Option<&'static Regex> {
    let pattern: &Lazy<Regex> = match name {
        "alpha_lower" => &ALPHA_LOWER,
        "alpha_lower_enforce" => &ALPHA_LOWER_ENFORCE,
        "alpha_lower_commas" => &ALPHA_LOWER_COMMAS,
        "alpha_lower_commas_enforce" => &ALPHA_LOWER_COMMAS_ENFORCE,
        "email" => &EMAIL,
        "float" => &FLOAT,
        "hour_format" => &HOUR_FORMAT,
        "machine_name" => &MACHINE_NAME,
        "machine_name_enforce" => &MACHINE_NAME_ENFORCE,
        "numeric" => &NUMERIC,
        "numeric_enforce" => &NUMERIC_ENFORCE,
        "telephone" => &TELEPHONE,
        "telephone_enforce" => &TELEPHONE_ENFORCE,
        "time" => &TIME,
        "time_enforce" => &TIME_ENFORCE,
        "url" => &URL,
        _ => return None,
    };
    Some(Lazy::force(pattern))
}

/// Like [`preset`], but an unknown name is an error.
pub fn require(name: &str) -> Result<&'static Regex, ToolError> {
    preset(name).ok_or_else(|| ToolError::UnknownPreset(name.to_string()))
}

/// Build an anchored pattern accepting any value of `min..=max` characters.
pub fn length_pattern(min: usize, max: usize) -> Result<Regex, ToolError> {
    Ok(Regex::new(&format!(r"^.{{{min},{max}}}$"))?)
}

/// Password strength check: at least 8 characters drawn from letters, digits
/// and `@$!%*#?&`, with at least one of each category present.
pub fn is_strong_password(value: &str) -> bool {
    const SPECIALS: &str = "@$!%*#?&";
    let mut has_letter = false;
    let mut has_digit = false;
    let mut has_special = false;
    for c in value.chars() {
        if c.is_ascii_alphabetic() {
            has_letter = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if SPECIALS.contains(c) {
            has_special = true;
        } else {
            return false;
        }
    }
    value.len() >= 8 && has_letter && has_digit && has_special
}
