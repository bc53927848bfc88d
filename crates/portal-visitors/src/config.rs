//! Tracker configuration.
//!
//! Loaded from environment variables with defaults for a single web node.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Longest accepted session inactivity timeout (30 days).
pub const MAX_SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Visitor tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum number of live sessions held in memory.
    pub max_sessions: usize,

    /// Seconds of inactivity after which a session expires.
    pub session_ttl_secs: i64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            session_ttl_secs: 30 * 60,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `VISITOR_MAX_SESSIONS`: Session capacity (default: 10000)
    /// - `VISITOR_SESSION_TTL_SECS`: Inactivity timeout (default: 1800)
    pub fn from_env() -> TrackerResult<Self> {
        let default = Self::default();
        let config = Self {
            max_sessions: parse_env("VISITOR_MAX_SESSIONS")?.unwrap_or(default.max_sessions),
            session_ttl_secs: parse_env("VISITOR_SESSION_TTL_SECS")?
                .unwrap_or(default.session_ttl_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Session inactivity timeout, clamped to `0..=MAX_SESSION_TTL_SECS`.
    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(self.session_ttl_secs.clamp(0, MAX_SESSION_TTL_SECS))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> TrackerResult<()> {
        if self.max_sessions == 0 {
            return Err(TrackerError::InvalidConfig {
                key: "VISITOR_MAX_SESSIONS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !(1..=MAX_SESSION_TTL_SECS).contains(&self.session_ttl_secs) {
            return Err(TrackerError::InvalidConfig {
                key: "VISITOR_SESSION_TTL_SECS".to_string(),
                message: format!("must be between 1 and {}", MAX_SESSION_TTL_SECS),
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> TrackerResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| TrackerError::InvalidConfig {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.max_sessions, 10_000);
        assert_eq!(config.session_ttl(), Duration::minutes(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = TrackerConfig {
            max_sessions: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TrackerError::InvalidConfig { .. })));

        let config = TrackerConfig {
            session_ttl_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_ttl() {
        let config = TrackerConfig {
            max_sessions: 10,
            session_ttl_secs: i64::MAX,
        };
        assert!(matches!(config.validate(), Err(TrackerError::InvalidConfig { .. })));
        assert_eq!(config.session_ttl(), Duration::days(30));

        let config = TrackerConfig {
            session_ttl_secs: MAX_SESSION_TTL_SECS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
