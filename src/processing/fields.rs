//! Synonym-key lookup and lenient coercion over untyped JSON
//!
//! AI output names the same logical field in several ways (`match_score`,
//! `matchScore`, `score`, ...). Each logical field is described by an ordered
//! list of candidate keys; the helpers here try them in priority order.
//!
//! Text comes back trimmed, both for scalar fields and for list items, and
//! whitespace-only text counts as absent.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Ordered candidate keys for one logical field, highest priority first.
pub type Synonyms = &'static [&'static str];

fn leading_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?")
            .expect("Invalid number regex")
    })
}

/// Null and whitespace-only strings count as absent.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// First value under `keys` that is present and not blank.
pub fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !is_blank(value))
}

/// Render a scalar as display text. Objects, arrays, booleans and null yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-empty textual value under `keys`.
pub fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(scalar_text)
}

/// First non-empty textual value under `keys`, or `fallback`.
pub fn text_or(obj: &Map<String, Value>, keys: &[&str], fallback: &str) -> String {
    first_text(obj, keys).unwrap_or_else(|| fallback.to_string())
}

/// Parse a number the way a lenient float parser would: JSON numbers as-is,
/// strings by their leading numeric prefix (`"85%"` is 85). Non-finite
/// results are rejected.
pub fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number_regex()
            .find(s)
            .and_then(|m| m.as_str().trim().parse::<f64>().ok()),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

fn truthy_item(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// A list of reasons: the first key holding a list or a bare string wins.
/// Bare strings become a single-element list; empty and falsy items are dropped.
pub fn reason_list(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    for key in keys {
        match obj.get(*key) {
            Some(Value::Array(items)) => return items.iter().filter_map(truthy_item).collect(),
            Some(Value::String(s)) if !s.trim().is_empty() => return vec![s.trim().to_string()],
            _ => continue,
        }
    }
    Vec::new()
}

/// A list passed through only when the source already holds one; scalars are
/// not coerced. Non-textual items are skipped.
pub fn list_only(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_array))
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}
