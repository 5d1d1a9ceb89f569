//! Error handling for grad-match

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradMatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Unusable AI response: {0}")]
    Response(#[from] ResponseError),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

/// Reasons an AI response could not be turned into a usable structure.
///
/// These never escape the public `parse_*` functions, which log them and
/// return `None`; the `try_parse_*` variants hand them back to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResponseError {
    #[error("no JSON found in response")]
    NoJsonFound,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("no recommendation list found")]
    MissingEntries,

    #[error("required key missing: {0}")]
    MissingKey(&'static str),

    #[error("response is not a JSON object")]
    NotAnObject,
}

pub type Result<T> = std::result::Result<T, GradMatchError>;
