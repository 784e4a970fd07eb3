//! String transforms: case conversion, slugs, sanitizing, extraction

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Global slug cache with the default `-` separator
static MECHANIZER: Lazy<Mechanizer> = Lazy::new(|| Mechanizer::new('-'));

static ANGLE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^<>@\s]+@[^<>@\s]+)>").unwrap());

/// Dots and percent-escapes stripped by [`safe_id`]
static DOT_OR_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.|%[0-9a-z]{2}").unwrap());

/// Convert a dashed string to camel case: `hello-world` → `helloWorld`.
pub fn dashed_to_camel(input: &str) -> String {
    let mut parts = input.split('-');
    let mut out = String::with_capacity(input.len());
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        out.push_str(&uc_first(part));
    }
    out
}

/// Convert a camel case string to dashed: `helloWorld` → `hello-world`.
pub fn camel_to_dashed(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_uppercase() {
            out.push('-');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Uppercase the first character.
pub fn uc_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character.
pub fn lc_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncate to `length` characters, appending `" ..."` when cut.
pub fn truncate(input: &str, length: usize) -> String {
    if input.chars().count() <= length {
        return input.to_string();
    }
    let mut out: String = input.chars().take(length).collect();
    out.push_str(" ...");
    out
}

/// Reduce a string to a safe identifier: lowercase, percent-escapes and dots
/// removed, then everything outside ASCII alphanumerics dropped.
pub fn safe_id(input: &str) -> String {
    DOT_OR_ESCAPE
        .replace_all(&input.to_lowercase(), "")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Pull email addresses out of an Outlook-style recipient list.
///
/// Prefers `Name <addr@host>` angle-bracket forms; falls back to splitting on
/// separators and keeping anything with an `@`.
pub fn parse_outlook_emails(input: &str) -> Vec<String> {
    let bracketed: Vec<String> = ANGLE_EMAIL
        .captures_iter(input)
        .map(|caps| caps[1].to_string())
        .collect();
    if !bracketed.is_empty() {
        return bracketed;
    }
    input
        .replace([';', ','], " ")
        .split_whitespace()
        .filter(|candidate| candidate.contains('@'))
        .map(str::to_string)
        .collect()
}

/// URL-friendly slugifier with a memoization cache.
///
/// The cache is per instance, so tests and long-lived callers can hold their
/// own rather than sharing hidden module state. [`mechanize`] uses a global
/// instance with the `-` separator.
pub struct Mechanizer {
    separator: char,
    cache: DashMap<String, String>,
}

impl Mechanizer {
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            cache: DashMap::new(),
        }
    }

    /// Slugify `input`, serving repeats from the cache.
    pub fn mechanize(&self, input: &str) -> String {
        if let Some(hit) = self.cache.get(input) {
            return hit.clone();
        }
        let slug: String = input
            .trim()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(&self.separator.to_string())
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect::<String>()
            .to_lowercase();
        self.cache.insert(input.to_string(), slug.clone());
        slug
    }

    /// Number of cached inputs.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Slugify with the global `-`-separated cache: `Hello world!` → `hello-world`.
pub fn mechanize(input: &str) -> String {
    MECHANIZER.mechanize(input)
}

/// Remove all whitespace.
pub fn remove_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Strip leading and trailing slashes.
pub fn remove_slashes(input: &str) -> &str {
    input.trim_matches('/')
}

/// First currency symbol (`£`, `$`, `€`) in the string, if any.
pub fn extract_currency(input: &str) -> Option<char> {
    input.chars().find(|c| matches!(c, '£' | '$' | '€'))
}

/// Strip punctuation from a search query and cap it at 50 characters.
pub fn sanitize_search_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .take(50)
        .collect()
}

/// Uppercased initials of each whitespace-separated word.
pub fn initials(input: &str) -> String {
    input
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Convert a `h:m:s` style string to seconds, multipliers assigned by
/// position from the left (`"05:30"` is 5 hours 30 minutes).
///
/// Returns `None` for unparseable parts or more than three segments.
pub fn time_string_to_seconds(input: &str) -> Option<f64> {
    const MULTIPLIERS: [f64; 3] = [3600.0, 60.0, 1.0];

    let parts: Vec<&str> = input.split(':').collect();
    if parts.is_empty() || parts.len() > MULTIPLIERS.len() {
        return None;
    }
    let mut seconds = 0.0;
    for (part, multiplier) in parts.iter().zip(MULTIPLIERS) {
        seconds += part.trim().parse::<f64>().ok()? * multiplier;
    }
    Some(seconds)
}

/// Slice between the first occurrence of `start` and the next `end`.
pub fn string_between<'a>(input: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = input.find(start)? + start.len();
    let to = input[from..].find(end)? + from;
    Some(&input[from..to])
}

/// Escape HTML special characters.
pub fn escape_html(unsafe_input: &str) -> String {
    unsafe_input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
