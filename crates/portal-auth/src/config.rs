//! Authentication configuration.
//!
//! Token signing and guard settings, loaded from environment variables with
//! defaults suitable for local development.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::claims::{DEFAULT_AUDIENCE, DEFAULT_ISSUER};

/// Minimum length of an HMAC signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted access token lifetime (one year).
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 365 * 24 * 60;

/// Longest accepted refresh token lifetime (five years).
pub const MAX_REFRESH_TOKEN_DAYS: i64 = 5 * 365;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Token and guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens.
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,

    /// Token issuer.
    pub issuer: String,

    /// Token audience.
    pub audience: Vec<String>,

    /// Access token lifetime in minutes.
    pub access_token_minutes: i64,

    /// Refresh token lifetime in days.
    pub refresh_token_days: i64,

    /// Route anonymous or expired sessions are redirected to.
    pub login_route: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: vec![DEFAULT_AUDIENCE.to_string()],
            access_token_minutes: 60,
            refresh_token_days: 7,
            login_route: "/".to_string(),
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORTAL_JWT_SECRET`: Token signing secret
    /// - `PORTAL_JWT_ISSUER`: Token issuer (default: security-portal)
    /// - `PORTAL_JWT_AUDIENCE`: Comma-separated audience (default: portal)
    /// - `PORTAL_ACCESS_TOKEN_MINUTES`: Access token lifetime (default: 60)
    /// - `PORTAL_REFRESH_TOKEN_DAYS`: Refresh token lifetime (default: 7)
    /// - `PORTAL_LOGIN_ROUTE`: Sign-in redirect target (default: /)
    ///
    /// Values that are present but unparsable are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();

        Ok(Self {
            jwt_secret: std::env::var("PORTAL_JWT_SECRET").ok(),
            issuer: std::env::var("PORTAL_JWT_ISSUER").unwrap_or(default.issuer),
            audience: std::env::var("PORTAL_JWT_AUDIENCE")
                .map(|s| {
                    s.split(',')
                        .map(|a| a.trim().to_string())
                        .filter(|a| !a.is_empty())
                        .collect()
                })
                .unwrap_or(default.audience),
            access_token_minutes: parse_env("PORTAL_ACCESS_TOKEN_MINUTES")?
                .unwrap_or(default.access_token_minutes),
            refresh_token_days: parse_env("PORTAL_REFRESH_TOKEN_DAYS")?
                .unwrap_or(default.refresh_token_days),
            login_route: std::env::var("PORTAL_LOGIN_ROUTE").unwrap_or(default.login_route),
        })
    }

    /// Access token lifetime.
    ///
    /// Clamped to `0..=MAX_ACCESS_TOKEN_MINUTES`; `validate()` rejects values
    /// outside that range.
    pub fn access_token_duration(&self) -> Duration {
        Duration::minutes(self.access_token_minutes.clamp(0, MAX_ACCESS_TOKEN_MINUTES))
    }

    /// Refresh token lifetime.
    ///
    /// Clamped to `0..=MAX_REFRESH_TOKEN_DAYS`.
    pub fn refresh_token_duration(&self) -> Duration {
        Duration::days(self.refresh_token_days.clamp(0, MAX_REFRESH_TOKEN_DAYS))
    }

    /// Validate the configuration.
    ///
    /// The signing secret must be present and long enough, token lifetimes
    /// positive and bounded, the audience non-empty, and the login route must be a
    /// public route so that redirecting to it cannot loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.jwt_secret {
            None => return Err(ConfigError::MissingEnvVar("PORTAL_JWT_SECRET".to_string())),
            Some(secret) if secret.len() < MIN_SECRET_LEN => {
                return Err(ConfigError::InvalidValue {
                    key: "PORTAL_JWT_SECRET".to_string(),
                    message: format!("must be at least {} characters", MIN_SECRET_LEN),
                })
            }
            Some(_) => {}
        }
        if !(1..=MAX_ACCESS_TOKEN_MINUTES).contains(&self.access_token_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "PORTAL_ACCESS_TOKEN_MINUTES".to_string(),
                message: format!("must be between 1 and {}", MAX_ACCESS_TOKEN_MINUTES),
            });
        }
        if !(1..=MAX_REFRESH_TOKEN_DAYS).contains(&self.refresh_token_days) {
            return Err(ConfigError::InvalidValue {
                key: "PORTAL_REFRESH_TOKEN_DAYS".to_string(),
                message: format!("must be between 1 and {}", MAX_REFRESH_TOKEN_DAYS),
            });
        }
        if self.audience.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "PORTAL_JWT_AUDIENCE".to_string(),
                message: "must name at least one audience".to_string(),
            });
        }
        if !portal_rbac::routes::is_public_route(&self.login_route) {
            return Err(ConfigError::InvalidValue {
                key: "PORTAL_LOGIN_ROUTE".to_string(),
                message: format!("{} is not a public route", self.login_route),
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
