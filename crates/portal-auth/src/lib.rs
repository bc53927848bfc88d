//! # Portal Authentication
//!
//! This crate connects portal sessions to the permission model in
//! `portal-rbac`.
//!
//! ## Overview
//!
//! The portal-auth crate handles:
//! - **Claims**: Session token claims carrying the principal's role
//! - **JWT**: Token generation, validation and refresh
//! - **Route guard**: Allow / redirect decisions for request targets
//! - **Configuration**: Environment-driven token and guard settings
//!
//! ## Features
//!
//! - `jwt` (default): JWT token support using jsonwebtoken
//!
//! ## Usage
//!
//! ```rust,no_run
//! use portal_auth::{GuardDecision, JwtService, RouteGuard};
//! use portal_rbac::Role;
//! use uuid::Uuid;
//!
//! let service = JwtService::with_secret("a-signing-secret-of-at-least-32-chars").unwrap();
//! let token = service
//!     .generate_access_token(Uuid::now_v7(), "rep@example.com", Role::Sales)
//!     .unwrap();
//! let claims = service.validate_token(&token).unwrap();
//!
//! let guard = RouteGuard::default();
//! assert_eq!(guard.landing_route(&claims), "/portal/sales");
//! assert_eq!(guard.decide(Some(&claims), "/leads"), GuardDecision::Allow);
//! ```
//!
//! ## Responsibilities
//!
//! Authentication (who the caller is) happens before this crate is
//! involved. The guard only authorizes: it takes the role out of validated
//! claims and asks the catalog.

pub mod claims;
pub mod config;
pub mod error;
pub mod guard;
#[cfg(feature = "jwt")]
pub mod jwt;

// Re-export main types
pub use claims::{PortalClaims, TokenType};
pub use config::{AuthConfig, ConfigError};
pub use error::{AuthError, AuthResult};
pub use guard::{GuardDecision, RouteGuard};

#[cfg(feature = "jwt")]
pub use jwt::{JwtAlgorithm, JwtConfig, JwtService, TokenPair};
