//! Lenient parsers for list and boolean values encoded in spreadsheet cells.
//!
//! Both parsers are total: malformed input degrades through fallbacks and
//! never produces an error.

use tracing::trace;

use crate::value::FieldValue;

/// Decode a string-encoded list.
///
/// Bracket-delimited input goes through three tiers: strict JSON, JSON after
/// turning single quotes into double quotes, then a plain comma split of the
/// bracket contents. Anything else is split on commas directly. Items are
/// trimmed and empty items dropped.
pub fn parse_array_string(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if !is_bracketed(trimmed) {
        return split_on_commas(trimmed, false);
    }

    if let Some(items) = parse_json_list(trimmed) {
        return items;
    }

    let requoted = trimmed.replace('\'', "\"");
    if let Some(items) = parse_json_list(&requoted) {
        return items;
    }

    trace!(input = %trimmed, "falling back to comma split for bracketed list");
    split_on_commas(&trimmed[1..trimmed.len() - 1], true)
}

/// Interpret a string as a boolean: only `true`, `yes` and `1` are truthy.
pub fn parse_boolean_string(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "true" | "yes" | "1")
}

/// True if `input` is one of the recognised boolean words, in either state.
pub fn is_boolean_string(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "1" | "0"
    )
}

/// Coerce any field value to a boolean.
///
/// Native booleans pass through, numbers are true when non-zero, strings go
/// through [`parse_boolean_string`] and lists are true when non-empty.
pub fn coerce_bool(value: &FieldValue) -> bool {
    match value {
        FieldValue::Bool(b) => *b,
        FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
        FieldValue::Text(s) => parse_boolean_string(s),
        FieldValue::List(items) => !items.is_empty(),
    }
}

/// Flatten a native list into trimmed, non-empty strings.
pub fn list_items(items: &[FieldValue]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.to_text().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

pub(crate) fn is_bracketed(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('[') && s.ends_with(']')
}

fn parse_json_list(s: &str) -> Option<Vec<String>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(s).ok()?;
    Some(
        values
            .into_iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

fn split_on_commas(s: &str, strip_quotes: bool) -> Vec<String> {
    s.split(',')
        .map(|segment| {
            let segment = segment.trim();
            if strip_quotes {
                strip_outer_quotes(segment).trim()
            } else {
                segment
            }
        })
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_outer_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['\'', '"']).unwrap_or(s);
    s.strip_suffix(['\'', '"']).unwrap_or(s)
}
