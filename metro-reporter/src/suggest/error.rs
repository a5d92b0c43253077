//! Suggestion provider error types.

use std::time::Duration;

/// Errors that can occur when asking the provider for station suggestions.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider token cannot be sent as a header
    #[error("invalid provider token")]
    InvalidToken,

    /// Provider returned a non-success status
    #[error("provider error {status}: {message}")]
    Api { status: u16, message: String },

    /// No response within the request deadline
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// Payload did not have the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Reading a local stations file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request was superseded or abandoned
    #[error("request cancelled")]
    Cancelled,
}

/// How the controller reacts to a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, non-2xx status or timeout. Retryable, shown to the user.
    Network,
    /// Malformed payload. Treated as zero results.
    Parse,
    /// Superseded or abandoned. Never surfaced.
    Cancellation,
}

impl SuggestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SuggestError::Json { .. } => ErrorKind::Parse,
            SuggestError::Cancelled => ErrorKind::Cancellation,
            SuggestError::Http(_)
            | SuggestError::InvalidToken
            | SuggestError::Api { .. }
            | SuggestError::Timeout(_)
            | SuggestError::Io(_) => ErrorKind::Network,
        }
    }
}
