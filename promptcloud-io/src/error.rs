//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while decoding wire payloads
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid point at index {index}: {message}")]
    InvalidPoint { index: usize, message: String },

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<IoError> for promptcloud_core::Error {
    fn from(err: IoError) -> Self {
        promptcloud_core::Error::InvalidData(err.to_string())
    }
}
