//! Minimal CSV-to-JSON conversion
//!
//! Commas inside double-quoted cells are protected with a sentinel before the
//! line is split, then restored. Quotes spanning lines are not supported.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ToolError;

const VALUE_COMMA: &str = "[valueComma]";

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).unwrap());

/// Replace commas inside double-quoted spans with a sentinel token.
pub fn encode_value_commas(text: &str) -> String {
    QUOTED
        .replace_all(text, |caps: &regex::Captures| caps[0].replace(',', VALUE_COMMA))
        .into_owned()
}

/// Restore commas previously hidden by [`encode_value_commas`].
pub fn decode_value_commas(text: &str) -> String {
    text.replace(VALUE_COMMA, ",")
}

/// Parse a CSV string into one JSON object per row, keyed by the header line.
///
/// `rename` maps header names to replacement keys. Blank lines are skipped;
/// rows shorter than the header pad with nulls. An input with no header at
/// all is an error.
pub fn csv_to_json(
    csv: &str,
    rename: &HashMap<&str, &str>,
) -> Result<Vec<Map<String, Value>>, ToolError> {
    if csv.trim().is_empty() {
        return Err(ToolError::EmptyCsv);
    }
    let mut lines = csv.lines();
    let headers: Vec<&str> = lines.next().unwrap_or("").split(',').collect();

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let encoded = encode_value_commas(line);
        let cells: Vec<&str> = encoded.split(',').collect();
        let mut row = Map::new();
        for (index, header) in headers.iter().enumerate() {
            let value = match cells.get(index) {
                Some(cell) => {
                    let cell = cell
                        .strip_prefix('"')
                        .and_then(|c| c.strip_suffix('"'))
                        .unwrap_or(cell);
                    Value::String(decode_value_commas(cell))
                }
                None => Value::Null,
            };
            let key = rename.get(header).copied().unwrap_or(header);
            row.insert(key.to_string(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}
