//! # Portal RBAC (Role-Based Access Control)
//!
//! This crate provides the permission model of the installation portal,
//! shared by the client, employee, sales, project-manager, manager and
//! admin portals.
//!
//! ## Overview
//!
//! The portal-rbac crate handles:
//! - **Roles**: The six principal roles and their seniority ranks
//! - **Capabilities**: Fine-grained boolean permission flags
//! - **Catalog**: One flat profile per role assigning every capability
//! - **Routes**: Exact route literals and the capability each requires
//! - **Evaluator**: Pure queries over the catalog
//!
//! ## Architecture
//!
//! ```text
//! Role ──► PermissionProfile (catalog) ──► bool per Capability
//!   │
//!   └──► rank (coarse seniority only)
//!
//! route path ──► RouteAccess (Public | Requires(Capability)) ──► has_permission
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use portal_rbac::{can_access_route, default_route, has_minimum_role, has_permission};
//! use portal_rbac::{Capability, Role};
//!
//! assert!(has_permission(Role::Sales, Capability::ManageLeads));
//! assert!(!has_permission(Role::Sales, Capability::ViewFinancial));
//!
//! assert!(can_access_route(Role::Sales, "/portal/sales"));
//! assert!(!can_access_route(Role::Admin, "/unknown"));
//!
//! assert_eq!(default_route(Role::Sales), "/portal/sales");
//! assert!(has_minimum_role(Role::Manager, Role::Employee));
//! ```
//!
//! ## Rank vs. capability
//!
//! Ranks tie (`Employee`/`Sales`, `ProjectManager`/`Manager`) and tied roles
//! hold different capabilities. `has_minimum_role` is for coarse gating;
//! anything that needs a specific capability must ask `has_permission`.

pub mod audit;
pub mod capabilities;
pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod roles;
pub mod routes;

// Re-export main types for convenience
pub use capabilities::{Capability, CapabilityGroup};
pub use catalog::PermissionProfile;
pub use error::{RbacError, RbacResult};
pub use evaluator::{
    accessible_routes, can_access_route, can_access_route_as, default_route, has_all_permissions,
    has_any_permission, has_minimum_role, has_permission,
};
pub use roles::{role_hierarchy, Role};
pub use routes::RouteAccess;
