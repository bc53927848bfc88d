//! Error types for visitor tracking

use thiserror::Error;

/// Visitor tracker error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// Session identifier is empty or too long
    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Result type for visitor tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
