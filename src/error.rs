//! Error types for chatrelay.

use thiserror::Error;

/// Common error type for chatrelay.
#[derive(Error, Debug)]
pub enum RelayError {
    /// A required request field was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A remote call to the coordinator failed.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Outcome of a failed push to one participant.
///
/// Handled inside the dispatcher and never surfaced to the caller that
/// produced the event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The callback address could not be reached (refused, unroutable, timed out).
    #[error("{address} unreachable: {reason}")]
    Unreachable { address: String, reason: String },

    /// The participant answered but did not accept the event.
    #[error("{address} rejected delivery: {reason}")]
    Rejected { address: String, reason: String },
}

impl DeliveryError {
    /// Whether this failure counts as proof that the participant is gone.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, DeliveryError::Unreachable { .. })
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Transport(e.to_string())
    }
}

/// Result type alias for chatrelay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
