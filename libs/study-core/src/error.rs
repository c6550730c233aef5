//! Error types for study-core.

use thiserror::Error;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors from the session progress aggregator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session is already completed")]
    AlreadyCompleted,
}
