//! Error types for promptcloud

use thiserror::Error;

/// Main error type for promptcloud core operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Rejections raised before any network activity happens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an instruction")]
    EmptyInstruction,

    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Unknown configuration '{config}' for task '{task}'")]
    UnknownConfig { task: String, config: String },
}

/// Result type alias for promptcloud operations
pub type Result<T> = std::result::Result<T, Error>;
