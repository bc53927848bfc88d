//! Session claims
//!
//! This module defines the JWT claims the portal issues after sign-in. The
//! claims carry the principal's [`Role`]; everything the guard decides is
//! derived from that one field.

use chrono::{DateTime, Utc};
use portal_rbac::{Capability, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token issuer.
pub const DEFAULT_ISSUER: &str = "security-portal";

/// Default token audience.
pub const DEFAULT_AUDIENCE: &str = "portal";

/// JWT claims for a portal session.
///
/// The `role` field deserializes through [`Role`]'s serde impl, so a token
/// naming a role outside the six portal roles fails to decode instead of
/// being mapped onto some default.
///
/// # Example
///
/// ```
/// use portal_auth::claims::PortalClaims;
/// use portal_rbac::Role;
/// use uuid::Uuid;
///
/// let claims = PortalClaims::new(
///     Uuid::now_v7(),
///     "rep@example.com",
///     Role::Sales,
///     chrono::Duration::hours(8),
/// );
/// assert_eq!(claims.landing_route(), "/portal/sales");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalClaims {
    // Standard JWT claims (RFC 7519)
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// JWT ID
    pub jti: String,

    // Portal claims
    /// User email
    pub email: String,

    /// User display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Role assigned by user management
    pub role: Role,

    /// Session ID
    pub session_id: String,

    /// Token type (access or refresh)
    #[serde(default)]
    pub token_type: TokenType,
}

impl PortalClaims {
    /// Create new claims for a user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's unique identifier
    /// * `email` - The user's email address
    /// * `role` - The user's portal role
    /// * `duration` - Token validity duration
    ///
    /// A duration that overflows the calendar yields claims that are already
    /// expired.
    pub fn new(user_id: Uuid, email: impl Into<String>, role: Role, duration: chrono::Duration) -> Self {
        let now = Utc::now();
        let exp = now.checked_add_signed(duration).unwrap_or(now);

        Self {
            sub: user_id.to_string(),
            iss: DEFAULT_ISSUER.to_string(),
            aud: vec![DEFAULT_AUDIENCE.to_string()],
            exp: exp.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            email: email.into(),
            name: None,
            role,
            session_id: Uuid::now_v7().to_string(),
            token_type: TokenType::Access,
        }
    }

    /// Get the user ID as UUID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Check if the token is expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check if the token is expired at a given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Get expiration as DateTime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Check if the session's role holds a capability.
    pub fn has_permission(&self, capability: Capability) -> bool {
        portal_rbac::has_permission(self.role, capability)
    }

    /// Check if the session's role may open a route.
    pub fn can_access_route(&self, path: &str) -> bool {
        portal_rbac::can_access_route(self.role, path)
    }

    /// Get the route to redirect to right after sign-in.
    pub fn landing_route(&self) -> &'static str {
        portal_rbac::default_route(self.role)
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the issuer and audience.
    pub fn with_issuer(mut self, issuer: impl Into<String>, audience: Vec<String>) -> Self {
        self.iss = issuer.into();
        self.aud = audience;
        self
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }
}

/// Token type enumeration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Access token (short-lived), accepted by route guards
    #[default]
    Access,

    /// Refresh token (long-lived), only exchanged for a new access token
    Refresh,
}
