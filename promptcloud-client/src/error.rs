//! Error types for the request pipeline

use crate::transport::TransportError;
use promptcloud_io::IoError;
use promptcloud_visualization::RenderError;
use std::time::Duration;
use thiserror::Error;

/// Message used when a failed response carries no `error` field
pub const GENERIC_FAILURE: &str = "Request failed";

/// Why a generation request failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Non-2xx response; `message` comes from the body's `error` field when present
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,

    /// 2xx response whose body could not be understood
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl RequestError {
    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Server { message, .. } => format!("Error: {message}"),
            RequestError::Transport(e) => format!("Error: {e}"),
            RequestError::Timeout(_) => "Request timed out. Please try again.".to_string(),
            RequestError::Cancelled => "Request cancelled".to_string(),
            RequestError::InvalidResponse(_) => format!("Error: {GENERIC_FAILURE}"),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Timeout(_))
    }
}

/// Why the precomputed fallback could not be shown
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FallbackError {
    #[error("fallback resource returned {status}")]
    Http { status: u16 },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("fallback fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid fallback data: {0}")]
    Parse(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<IoError> for FallbackError {
    fn from(err: IoError) -> Self {
        FallbackError::Parse(err.to_string())
    }
}
