//! URL and query-string helpers
//!
//! These work on plain strings so that relative URLs and bare query strings
//! are accepted, not just absolute URLs the `url` crate can parse. Query
//! parameters live in a `serde_json::Map`, which preserves insertion order.

use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde_json::{Map, Value};
use url::Url;

/// Characters escaped when encoding a query component. Everything except
/// alphanumerics and `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static ARRAY_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)\[\d*\]$").unwrap());

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

fn decode_component(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Extract query parameters from a URL or bare query string.
///
/// Keys ending in `[]` (or `[0]`, `[1]`, ...) collect into an array under the
/// bare key. Values are percent-decoded. Parameters keep their order of
/// appearance.
pub fn url_params(url: &str) -> Map<String, Value> {
    let query = match url.split_once('?') {
        Some((_, rest)) => rest.split('#').next().unwrap_or(""),
        None => url,
    };
    let mut params = Map::new();
    if query.is_empty() {
        return params;
    }
    for (index, part) in query.split('&').enumerate() {
        // A URL without '?' lands here whole; drop the address part.
        if index == 0 && part.starts_with("http") {
            continue;
        }
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        let key = decode_component(key);
        let value = Value::String(decode_component(value));
        if let Some(caps) = ARRAY_KEY.captures(&key) {
            let entry = params
                .entry(caps[1].to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(items) = entry {
                items.push(value);
            }
        } else {
            params.insert(key, value);
        }
    }
    params
}

/// Serialize an array as repeated `name[]=value` pairs.
pub fn array_to_query_string<S: AsRef<str>>(name: &str, items: &[S], encode: bool) -> String {
    let pairs: Vec<String> = items
        .iter()
        .map(|item| {
            if encode {
                format!("{}[]={}", encode_component(name), encode_component(item.as_ref()))
            } else {
                format!("{}[]={}", name, item.as_ref())
            }
        })
        .collect();
    pairs.join("&")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Serialize a parameter map as a `?key=value&...` query string.
///
/// Array values expand through [`array_to_query_string`]. An empty map yields
/// an empty string.
pub fn object_to_query_string(params: &Map<String, Value>, encode: bool) -> String {
    let mut out = String::from("?");
    for (key, value) in params {
        if key.is_empty() {
            continue;
        }
        match value {
            Value::Array(items) => {
                let texts: Vec<String> = items.iter().map(value_text).collect();
                out.push_str(&array_to_query_string(key, &texts, encode));
                out.push('&');
            }
            _ => {
                let text = value_text(value);
                if encode {
                    out.push_str(&encode_component(key));
                    out.push('=');
                    out.push_str(&encode_component(&text));
                } else {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(&text);
                }
                out.push('&');
            }
        }
    }
    out.pop();
    out
}

/// Percent-decode a string, tolerating stray `%` characters.
///
/// A `%` not opening a valid escape is first escaped itself, so malformed
/// input decodes instead of being rejected.
pub fn decode_uri_component_safe(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut protected = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        if c == '%' {
            let valid = bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
            if !valid {
                protected.push_str("%25");
                continue;
            }
        }
        protected.push(c);
    }
    decode_component(&protected)
}

/// Whether two URLs share a path and the same set of parameters.
pub fn are_urls_equal(a: &str, b: &str) -> bool {
    let path_a = a.split('?').next().unwrap_or("");
    let path_b = b.split('?').next().unwrap_or("");
    path_a == path_b && url_params(a) == url_params(b)
}

/// Drop a single trailing slash.
pub fn remove_last_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Collapse double slashes and drop the trailing slash.
pub fn sanitize_path(path: &str) -> String {
    remove_last_slash(&path.replace("//", "/")).to_string()
}

/// Strip the scheme-and-host origin from an absolute URL. Relative URLs come
/// back unchanged.
pub fn remove_url_origin(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let origin = parsed.origin().ascii_serialization();
    url.strip_prefix(&origin).unwrap_or(url).to_string()
}

/// Origin-less, slash-normalized form of a URL.
pub fn sanitize_url(url: &str) -> String {
    sanitize_path(&remove_url_origin(url))
}

/// Path component of a URL, defaulting to `/` when there is none.
pub fn url_path(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or("");
    let path = sanitize_url(without_query);
    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

/// Value of a single query parameter. Strings are safely decoded; `name[]`
/// parameters come back as an array.
pub fn url_param(name: &str, url: &str) -> Option<Value> {
    let params = url_params(url);
    match params.get(name)? {
        Value::String(s) => Some(Value::String(decode_uri_component_safe(s))),
        other => Some(other.clone()),
    }
}

/// Match a URL path against a route pattern, where `:name` segments match any
/// single segment.
pub fn match_path(url: &str, route: &str) -> bool {
    let path = url_path(url);
    let path_parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    let route_parts: Vec<&str> = route.split('/').filter(|p| !p.is_empty()).collect();
    if path_parts.len() != route_parts.len() {
        return false;
    }
    route_parts
        .iter()
        .zip(&path_parts)
        .all(|(route_part, path_part)| route_part.starts_with(':') || route_part == path_part)
}

/// Match a URL path against any of the given route patterns.
pub fn match_paths(url: &str, routes: &[&str]) -> bool {
    routes.iter().any(|route| match_path(url, route))
}

/// Non-empty segments of a URL path.
pub fn path_parts(url: &str) -> Vec<String> {
    url_path(url)
        .split('/')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rewrite the query string of a URL.
///
/// Existing parameters keep their positions, patched ones are updated in
/// place, new ones append, and `null` values delete. The path is left alone.
pub fn edit_url(url: &str, patch: &Map<String, Value>, encode: bool) -> String {
    let base = url.split('?').next().unwrap_or("");
    let mut params = url_params(url);
    for (key, value) in patch {
        if value.is_null() {
            params.remove(key);
        } else {
            params.insert(key.clone(), value.clone());
        }
    }
    format!("{base}{}", object_to_query_string(&params, encode))
}

/// Drop one query parameter from a URL.
pub fn remove_url_param(name: &str, url: &str) -> String {
    let base = url.split('?').next().unwrap_or("");
    let mut params = url_params(url);
    params.remove(name);
    format!("{base}{}", object_to_query_string(&params, true))
}

/// Parent of the URL's path, or an empty string at the root.
pub fn parent_path(url: &str) -> String {
    let path = url_path(url);
    let mut parts: Vec<&str> = path.split('/').collect();
    parts.pop();
    parts.join("/")
}
