//! # Permission Evaluator
//!
//! Stateless queries over the catalog. Every function here is pure: same
//! inputs, same answer, no locks, safe to call from any thread.
//!
//! Denials are plain `false`. Nothing in this module returns an error.

use crate::capabilities::Capability;
use crate::catalog;
use crate::roles::Role;
use crate::routes::{self, RouteAccess};

/// Check if a role holds a capability.
///
/// # Example
///
/// ```
/// use portal_rbac::{has_permission, Capability, Role};
///
/// assert!(has_permission(Role::Admin, Capability::ManageSystem));
/// assert!(!has_permission(Role::Manager, Capability::ManageSystem));
/// ```
pub fn has_permission(role: Role, capability: Capability) -> bool {
    catalog::profile(role).get(capability)
}

/// Check if a role holds at least one of the capabilities.
///
/// An empty slice grants nothing.
pub fn has_any_permission(role: Role, capabilities: &[Capability]) -> bool {
    capabilities.iter().any(|c| has_permission(role, *c))
}

/// Check if a role holds every one of the capabilities.
///
/// An empty slice is vacuously satisfied.
pub fn has_all_permissions(role: Role, capabilities: &[Capability]) -> bool {
    capabilities.iter().all(|c| has_permission(role, *c))
}

/// Check if a role may open a route.
///
/// Public routes are open to every role. Protected routes delegate to
/// [`has_permission`]. Paths missing from the route table are denied for
/// every role, `Admin` included.
///
/// # Example
///
/// ```
/// use portal_rbac::{can_access_route, Role};
///
/// assert!(can_access_route(Role::Sales, "/portal/sales"));
/// assert!(!can_access_route(Role::Client, "/portal/sales"));
/// assert!(!can_access_route(Role::Admin, "/not-a-route"));
/// ```
pub fn can_access_route(role: Role, path: &str) -> bool {
    match routes::route_access(path) {
        Some(RouteAccess::Public) => true,
        Some(RouteAccess::Requires(capability)) => has_permission(role, capability),
        None => false,
    }
}

/// Check if a possibly anonymous caller may open a route.
///
/// `None` stands for a caller without a session; it only reaches public
/// routes.
pub fn can_access_route_as(role: Option<Role>, path: &str) -> bool {
    match role {
        Some(role) => can_access_route(role, path),
        None => routes::is_public_route(path),
    }
}

/// Get the landing route of a role after sign-in.
pub fn default_route(role: Role) -> &'static str {
    routes::default_route(role)
}

/// Check if `role` ranks at least as high as `required`.
///
/// This compares seniority only. Roles of equal rank hold different
/// capabilities, so gate on [`has_permission`] whenever a specific
/// capability is what the operation needs.
///
/// # Example
///
/// ```
/// use portal_rbac::{has_minimum_role, Role};
///
/// assert!(has_minimum_role(Role::Manager, Role::Employee));
/// assert!(!has_minimum_role(Role::Employee, Role::Manager));
/// assert!(has_minimum_role(Role::Sales, Role::Employee));
/// ```
pub fn has_minimum_role(role: Role, required: Role) -> bool {
    role.rank() >= required.rank()
}

/// List the routes of the table a role can open, in table order.
pub fn accessible_routes(role: Role) -> Vec<&'static str> {
    routes::routes()
        .iter()
        .map(|(path, _)| *path)
        .filter(|path| can_access_route(role, path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_permission_scenarios() {
        assert!(!has_permission(Role::Client, Capability::ViewAllProjects));
        assert!(has_permission(Role::Client, Capability::ViewOwnProjects));
        assert!(has_permission(Role::Admin, Capability::ManageSystem));
        assert!(!has_permission(Role::Manager, Capability::ManageSystem));
    }

    #[test]
    fn test_has_any_and_all() {
        let lead_work = [Capability::ViewLeads, Capability::ManageLeads];
        assert!(has_all_permissions(Role::Sales, &lead_work));
        assert!(!has_any_permission(Role::ProjectManager, &lead_work));
        assert!(has_any_permission(Role::Manager, &lead_work));
        assert!(!has_all_permissions(Role::Manager, &lead_work));

        assert!(!has_any_permission(Role::Admin, &[]));
        assert!(has_all_permissions(Role::Client, &[]));
    }

    #[test]
    fn test_route_access_scenarios() {
        assert!(can_access_route(Role::Sales, "/portal/sales"));
        assert!(!can_access_route(Role::Client, "/portal/sales"));
        assert!(can_access_route(Role::ProjectManager, "/inventory"));
        assert!(!can_access_route(Role::Sales, "/inventory"));
        assert!(can_access_route(Role::Sales, "/leads"));
        assert!(!can_access_route(Role::ProjectManager, "/leads"));
    }

    #[test]
    fn test_dashboard_is_capability_gated_but_open_to_all_roles() {
        for role in Role::all() {
            assert!(can_access_route(role, "/dashboard"));
        }
        assert!(!can_access_route_as(None, "/dashboard"));
    }

    #[test]
    fn test_anonymous_access() {
        assert!(can_access_route_as(None, "/"));
        assert!(can_access_route_as(None, "/home"));
        assert!(!can_access_route_as(None, "/portal/client"));
        assert!(can_access_route_as(Some(Role::Client), "/portal/client"));
    }

    #[test]
    fn test_default_routes() {
        assert_eq!(default_route(Role::Sales), "/portal/sales");
        assert_eq!(default_route(Role::Client), "/portal/client");
        assert_eq!(default_route(Role::ProjectManager), "/portal/project-manager");
        for role in Role::all() {
            assert!(can_access_route(role, default_route(role)));
        }
    }

    #[test]
    fn test_has_minimum_role() {
        assert!(has_minimum_role(Role::Manager, Role::Employee));
        assert!(!has_minimum_role(Role::Employee, Role::Manager));
        assert!(has_minimum_role(Role::Sales, Role::Employee));
        assert!(has_minimum_role(Role::Employee, Role::Sales));
        assert!(has_minimum_role(Role::ProjectManager, Role::Manager));
        assert!(has_minimum_role(Role::Admin, Role::Admin));
        assert!(!has_minimum_role(Role::Client, Role::Employee));
    }

    #[test]
    fn test_accessible_routes() {
        let client = accessible_routes(Role::Client);
        assert_eq!(
            client,
            vec!["/", "/home", "/dashboard", "/portal/client", "/my-projects"]
        );

        let admin = accessible_routes(Role::Admin);
        assert_eq!(admin.len(), routes::routes().len());
    }
}
