//! Error types for the permission model
//!
//! Inside the crate every role and capability is a typed value, so lookups
//! cannot fail. Errors only arise at the string boundary, where a session,
//! token or request hands over a raw role or capability name.

use thiserror::Error;

/// Errors raised when converting raw strings into permission types.
///
/// An unrecognized value is always rejected. It is never mapped to a
/// default role or treated as a denial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    /// The role name is not one of the six portal roles
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// The capability key is not in the catalog
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),
}

/// Result type for permission model conversions.
pub type RbacResult<T> = Result<T, RbacError>;

impl RbacError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::UnknownRole(_) => "UNKNOWN_ROLE",
            RbacError::UnknownCapability(_) => "UNKNOWN_CAPABILITY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RbacError::UnknownRole("owner".to_string());
        assert_eq!(err.to_string(), "Unknown role: owner");
        assert_eq!(err.error_code(), "UNKNOWN_ROLE");

        let err = RbacError::UnknownCapability("fly".to_string());
        assert_eq!(err.to_string(), "Unknown capability: fly");
        assert_eq!(err.error_code(), "UNKNOWN_CAPABILITY");
    }
}
