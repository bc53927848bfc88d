//! Error types for authentication and route guarding
//!
//! This module defines the errors a guard can return while turning a
//! session token into an allow/deny decision.

use portal_rbac::Role;
use thiserror::Error;

/// Authentication and authorization error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// JWT token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// JWT token is invalid (malformed, bad signature, unknown role, etc.)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// No session was presented for a protected route
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The session's role may not perform the operation
    #[error("Forbidden: role '{role}' may not access {target}")]
    Forbidden {
        /// Role of the caller.
        role: Role,
        /// Route path or capability that was refused.
        target: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Check if this error should be logged at error level.
    ///
    /// Denials and bad tokens are routine and are not server errors.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AuthError::Internal(_) | AuthError::ConfigError(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::TokenExpired | AuthError::InvalidToken(_) | AuthError::Unauthorized(_) => 401,
            AuthError::Forbidden { .. } => 403,
            AuthError::ConfigError(_) | AuthError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken(_) => "INVALID_TOKEN",
            AuthError::Unauthorized(_) => "UNAUTHORIZED",
            AuthError::Forbidden { .. } => "FORBIDDEN",
            AuthError::ConfigError(_) => "CONFIG_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if the caller should be sent back to sign in.
    pub fn requires_sign_in(&self) -> bool {
        matches!(
            self,
            AuthError::TokenExpired | AuthError::InvalidToken(_) | AuthError::Unauthorized(_)
        )
    }
}
