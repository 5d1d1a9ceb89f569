//! Pulling JSON out of raw AI model responses

use crate::error::ResponseError;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Raw model output: free text that may embed JSON, or an already-parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum AiResponse {
    Text(String),
    Structured(Value),
}

impl From<&str> for AiResponse {
    fn from(text: &str) -> Self {
        AiResponse::Text(text.to_string())
    }
}

impl From<String> for AiResponse {
    fn from(text: String) -> Self {
        AiResponse::Text(text)
    }
}

impl From<Value> for AiResponse {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => AiResponse::Text(text),
            other => AiResponse::Structured(other),
        }
    }
}

impl From<&Value> for AiResponse {
    fn from(value: &Value) -> Self {
        AiResponse::from(value.clone())
    }
}

impl AiResponse {
    /// Resolve to a JSON tree, extracting from text when needed.
    pub fn into_json(self) -> Result<Value, ResponseError> {
        match self {
            AiResponse::Text(text) => extract_json(&text),
            AiResponse::Structured(value) => Ok(value),
        }
    }
}

fn fenced_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json|JSON)?\s*([\[{].*?[\]}])\s*```").expect("Invalid fence regex")
    })
}

/// The body of the first fenced code block that holds a JSON object or array.
pub fn fenced_json(text: &str) -> Option<&str> {
    fenced_block_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse JSON from a fenced block if one exists, otherwise from the whole text.
pub fn extract_json(text: &str) -> Result<Value, ResponseError> {
    let candidate = match fenced_json(text) {
        Some(block) => block,
        None => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(ResponseError::NoJsonFound);
            }
            trimmed
        }
    };

    serde_json::from_str(candidate).map_err(|e| ResponseError::InvalidJson(e.to_string()))
}
