//! Common error types for Artpost API calls

use std::time::Duration;

/// Common result type
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failure of a single request/response exchange with an external API.
///
/// Every variant is terminal for the run; nothing is retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Response code not 200 OK: {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("Deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),
}

impl ApiError {
    /// Get the error code for log output
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "TRANSPORT_ERROR",
            ApiError::Status { .. } => "NON_SUCCESS_STATUS",
            ApiError::Decode(_) => "DECODE_ERROR",
            ApiError::EmptyResult(_) => "EMPTY_RESULT",
            ApiError::DeadlineExceeded(_) => "DEADLINE_EXCEEDED",
        }
    }

    /// HTTP status carried by a non-success response, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
