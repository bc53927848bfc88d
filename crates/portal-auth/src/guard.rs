//! Route guard
//!
//! Turns an already-authenticated session (or its absence) into a decision
//! for a requested route, using the permission model in `portal_rbac`.
//! The guard never authenticates; it trusts the claims it is handed.

use chrono::{DateTime, Utc};
use portal_rbac::{Capability, Role};
use serde::{Deserialize, Serialize};

use crate::claims::{PortalClaims, TokenType};
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// What the caller should do with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "location", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Serve the route.
    Allow,
    /// Send the caller to sign in.
    RedirectToLogin(String),
    /// Signed in but not allowed here; send the caller to their own portal.
    RedirectToDefault(String),
}

/// Strip the query string and fragment from a request target.
///
/// # Example
///
/// ```
/// use portal_auth::guard::route_path;
///
/// assert_eq!(route_path("/leads?status=open#top"), "/leads");
/// assert_eq!(route_path("/leads"), "/leads");
/// ```
pub fn route_path(target: &str) -> &str {
    let end = target.find(|c: char| c == '?' || c == '#').unwrap_or(target.len());
    &target[..end]
}

/// Route guard for portal requests.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_route: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

impl RouteGuard {
    /// Create a guard that redirects anonymous callers to `login_route`.
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
        }
    }

    /// Create a guard from portal configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.login_route.clone())
    }

    /// Get the sign-in redirect target.
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Authorize a request target for a session.
    ///
    /// Public routes pass without a session. Otherwise the session must be
    /// present, unexpired, an access token, and its role must be allowed on
    /// the route. Unmapped routes are refused for every role.
    pub fn authorize(&self, claims: Option<&PortalClaims>, target: &str) -> AuthResult<()> {
        self.authorize_at(claims, target, Utc::now())
    }

    /// [`authorize`](Self::authorize) evaluated at a given instant.
    pub fn authorize_at(&self, claims: Option<&PortalClaims>, target: &str, now: DateTime<Utc>) -> AuthResult<()> {
        let path = route_path(target);
        if portal_rbac::routes::is_public_route(path) {
            return Ok(());
        }

        let claims = Self::session(claims, now)?;
        if portal_rbac::can_access_route(claims.role, path) {
            tracing::debug!(role = %claims.role, path, "route allowed");
            Ok(())
        } else {
            tracing::info!(
                role = %claims.role,
                path,
                session_id = %claims.session_id,
                "route denied"
            );
            Err(AuthError::Forbidden {
                role: claims.role,
                target: path.to_string(),
            })
        }
    }

    /// Decide how to answer a request target.
    ///
    /// Sign-in problems redirect to the login route; a signed-in caller who
    /// is refused goes to their role's landing route.
    pub fn decide(&self, claims: Option<&PortalClaims>, target: &str) -> GuardDecision {
        self.decide_at(claims, target, Utc::now())
    }

    /// [`decide`](Self::decide) evaluated at a given instant.
    pub fn decide_at(&self, claims: Option<&PortalClaims>, target: &str, now: DateTime<Utc>) -> GuardDecision {
        match self.authorize_at(claims, target, now) {
            Ok(()) => GuardDecision::Allow,
            Err(AuthError::Forbidden { role, .. }) => {
                GuardDecision::RedirectToDefault(portal_rbac::default_route(role).to_string())
            }
            Err(_) => GuardDecision::RedirectToLogin(self.login_route.clone()),
        }
    }

    /// Get the route to send a session to right after sign-in.
    pub fn landing_route(&self, claims: &PortalClaims) -> &'static str {
        portal_rbac::default_route(claims.role)
    }

    /// Require a capability for a server-side action.
    pub fn require_permission(&self, claims: Option<&PortalClaims>, capability: Capability) -> AuthResult<()> {
        let claims = Self::session(claims, Utc::now())?;
        if portal_rbac::has_permission(claims.role, capability) {
            Ok(())
        } else {
            tracing::info!(role = %claims.role, capability = %capability, "action denied");
            Err(AuthError::Forbidden {
                role: claims.role,
                target: capability.to_string(),
            })
        }
    }

    /// Require a minimum role rank.
    ///
    /// Only for coarse gating. Prefer
    /// [`require_permission`](Self::require_permission) whenever a specific
    /// capability is what the action needs.
    pub fn require_minimum_role(&self, claims: Option<&PortalClaims>, required: Role) -> AuthResult<()> {
        let claims = Self::session(claims, Utc::now())?;
        if portal_rbac::has_minimum_role(claims.role, required) {
            Ok(())
        } else {
            tracing::info!(role = %claims.role, required = %required, "rank too low");
            Err(AuthError::Forbidden {
                role: claims.role,
                target: format!("role:{}", required),
            })
        }
    }

    fn session(claims: Option<&PortalClaims>, now: DateTime<Utc>) -> AuthResult<&PortalClaims> {
        let claims = claims.ok_or_else(|| AuthError::Unauthorized("No session".to_string()))?;
        if claims.is_expired_at(now) {
            tracing::debug!(session_id = %claims.session_id, "session expired");
            return Err(AuthError::TokenExpired);
        }
        if claims.token_type != TokenType::Access {
            tracing::warn!(session_id = %claims.session_id, "refresh token presented to guard");
            return Err(AuthError::InvalidToken(
                "Refresh tokens cannot authorize requests".to_string(),
            ));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn session(role: Role) -> PortalClaims {
        PortalClaims::new(Uuid::now_v7(), "user@example.com", role, Duration::hours(1))
    }

    #[test]
    fn test_route_path() {
        assert_eq!(route_path("/"), "/");
        assert_eq!(route_path("/dashboard?tab=1"), "/dashboard");
        assert_eq!(route_path("/dashboard#x"), "/dashboard");
        assert_eq!(route_path("?x"), "");
    }

    #[test]
    fn test_public_routes_need_no_session() {
        let guard = RouteGuard::default();
        assert!(guard.authorize(None, "/").is_ok());
        assert!(guard.authorize(None, "/home?ref=flyer").is_ok());
    }

    #[test]
    fn test_anonymous_protected_route() {
        let guard = RouteGuard::default();
        let err = guard.authorize(None, "/dashboard").unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized(_)));
        assert_eq!(
            guard.decide(None, "/dashboard"),
            GuardDecision::RedirectToLogin("/".to_string())
        );
    }

    #[test]
    fn test_role_routes() {
        let guard = RouteGuard::default();
        let sales = session(Role::Sales);
        let client = session(Role::Client);

        assert!(guard.authorize(Some(&sales), "/portal/sales").is_ok());
        assert!(guard.authorize(Some(&sales), "/leads?owner=me").is_ok());

        let err = guard.authorize(Some(&client), "/portal/sales").unwrap_err();
        assert!(matches!(err, AuthError::Forbidden { role: Role::Client, ref target } if target == "/portal/sales"));
        assert_eq!(
            guard.decide(Some(&client), "/portal/sales"),
            GuardDecision::RedirectToDefault("/portal/client".to_string())
        );
    }

    #[test]
    fn test_unmapped_route_denied_even_for_admin() {
        let guard = RouteGuard::default();
        let admin = session(Role::Admin);
        assert!(matches!(
            guard.authorize(Some(&admin), "/admin/secret"),
            Err(AuthError::Forbidden { .. })
        ));
        assert_eq!(
            guard.decide(Some(&admin), "/admin/secret"),
            GuardDecision::RedirectToDefault("/portal/admin".to_string())
        );
    }

    #[test]
    fn test_expired_session_redirects_to_login() {
        let guard = RouteGuard::new("/home");
        let claims = session(Role::Manager);
        let later = Utc::now() + Duration::hours(2);

        assert!(matches!(
            guard.authorize_at(Some(&claims), "/reports", later),
            Err(AuthError::TokenExpired)
        ));
        assert_eq!(
            guard.decide_at(Some(&claims), "/reports", later),
            GuardDecision::RedirectToLogin("/home".to_string())
        );
        assert!(guard.authorize_at(Some(&claims), "/home", later).is_ok());
    }

    #[test]
    fn test_refresh_token_cannot_authorize() {
        let guard = RouteGuard::default();
        let claims = session(Role::Admin).with_token_type(TokenType::Refresh);
        assert!(matches!(
            guard.authorize(Some(&claims), "/settings"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_landing_route() {
        let guard = RouteGuard::default();
        for role in Role::all() {
            let claims = session(role);
            let landing = guard.landing_route(&claims);
            assert_eq!(guard.decide(Some(&claims), landing), GuardDecision::Allow);
        }
    }

    #[test]
    fn test_require_permission() {
        let guard = RouteGuard::default();
        let pm = session(Role::ProjectManager);

        assert!(guard.require_permission(Some(&pm), Capability::ManageInventory).is_ok());
        let err = guard
            .require_permission(Some(&pm), Capability::ManageLeads)
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(err.to_string().contains("manageLeads"));

        assert!(matches!(
            guard.require_permission(None, Capability::ViewDashboard),
            Err(AuthError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_require_minimum_role() {
        let guard = RouteGuard::default();
        let sales = session(Role::Sales);

        assert!(guard.require_minimum_role(Some(&sales), Role::Employee).is_ok());
        assert!(guard.require_minimum_role(Some(&sales), Role::Manager).is_err());
    }

    #[test]
    fn test_decision_serialization() {
        let json = serde_json::to_value(GuardDecision::RedirectToDefault("/portal/sales".into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "decision": "redirect_to_default", "location": "/portal/sales" })
        );
        let json = serde_json::to_value(GuardDecision::Allow).unwrap();
        assert_eq!(json, serde_json::json!({ "decision": "allow" }));
    }
}
