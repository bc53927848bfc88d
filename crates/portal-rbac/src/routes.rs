//! # Routes
//!
//! The routing policy table: exact route literals mapped to the access they
//! require, plus the post-login landing route of each role.
//!
//! There is no pattern matching. `/leads` and `/leads/` are different keys,
//! and a path missing from the table has no entry at all, which the
//! evaluator treats as a denial.

use serde::{Deserialize, Serialize};

use crate::capabilities::Capability;
use crate::roles::Role;

/// Access requirement of a route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", tag = "access", content = "capability")]
pub enum RouteAccess {
    /// Open to every caller, signed in or not.
    Public,
    /// Requires the given capability.
    Requires(Capability),
}

/// The route table, in display order.
pub const ROUTES: &[(&str, RouteAccess)] = &[
    ("/", RouteAccess::Public),
    ("/home", RouteAccess::Public),
    ("/dashboard", RouteAccess::Requires(Capability::ViewDashboard)),
    ("/portal/client", RouteAccess::Requires(Capability::AccessClientPortal)),
    ("/portal/employee", RouteAccess::Requires(Capability::AccessEmployeePortal)),
    ("/portal/sales", RouteAccess::Requires(Capability::AccessSalesPortal)),
    ("/portal/manager", RouteAccess::Requires(Capability::AccessManagerPortal)),
    (
        "/portal/project-manager",
        RouteAccess::Requires(Capability::AccessProjectManagerPortal),
    ),
    ("/portal/admin", RouteAccess::Requires(Capability::AccessAdminPortal)),
    ("/projects", RouteAccess::Requires(Capability::ViewAllProjects)),
    ("/my-projects", RouteAccess::Requires(Capability::ViewOwnProjects)),
    ("/clients", RouteAccess::Requires(Capability::ViewClients)),
    ("/leads", RouteAccess::Requires(Capability::ViewLeads)),
    ("/quotes", RouteAccess::Requires(Capability::ViewAllQuotes)),
    ("/invoices", RouteAccess::Requires(Capability::ViewAllInvoices)),
    ("/financial", RouteAccess::Requires(Capability::ViewFinancial)),
    ("/tickets", RouteAccess::Requires(Capability::ViewAllTickets)),
    ("/reports", RouteAccess::Requires(Capability::ViewReports)),
    ("/referrals", RouteAccess::Requires(Capability::ViewReferrals)),
    ("/inventory", RouteAccess::Requires(Capability::ViewInventory)),
    ("/schedule", RouteAccess::Requires(Capability::ViewSchedule)),
    ("/employees", RouteAccess::Requires(Capability::ViewEmployees)),
    ("/users", RouteAccess::Requires(Capability::ManageUsers)),
    ("/analytics", RouteAccess::Requires(Capability::ViewAnalytics)),
    ("/settings", RouteAccess::Requires(Capability::ManageSettings)),
    ("/admin", RouteAccess::Requires(Capability::ManageSystem)),
];

/// Look up the access requirement of a route literal.
///
/// Returns `None` for paths that are not in the table.
///
/// # Example
///
/// ```
/// use portal_rbac::{routes, Capability, RouteAccess};
///
/// assert_eq!(routes::route_access("/"), Some(RouteAccess::Public));
/// assert_eq!(
///     routes::route_access("/leads"),
///     Some(RouteAccess::Requires(Capability::ViewLeads))
/// );
/// assert_eq!(routes::route_access("/leads/42"), None);
/// ```
pub fn route_access(path: &str) -> Option<RouteAccess> {
    ROUTES
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, access)| *access)
}

/// Check if a path is one of the public routes.
pub fn is_public_route(path: &str) -> bool {
    matches!(route_access(path), Some(RouteAccess::Public))
}

/// Get the full route table.
pub fn routes() -> &'static [(&'static str, RouteAccess)] {
    ROUTES
}

/// Get the landing route of a role after sign-in.
///
/// Each role lands on its own portal.
pub fn default_route(role: Role) -> &'static str {
    match role {
        Role::Client => "/portal/client",
        Role::Employee => "/portal/employee",
        Role::Sales => "/portal/sales",
        Role::ProjectManager => "/portal/project-manager",
        Role::Manager => "/portal/manager",
        Role::Admin => "/portal/admin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_route_literals_are_unique() {
        let paths: HashSet<_> = ROUTES.iter().map(|(p, _)| *p).collect();
        assert_eq!(paths.len(), ROUTES.len());
    }

    #[test]
    fn test_public_routes() {
        assert!(is_public_route("/"));
        assert!(is_public_route("/home"));
        assert!(!is_public_route("/dashboard"));
        assert!(!is_public_route("/nowhere"));
    }

    #[test]
    fn test_exact_matching_only() {
        assert!(route_access("/leads").is_some());
        assert!(route_access("/leads/").is_none());
        assert!(route_access("/Leads").is_none());
        assert!(route_access("/portal").is_none());
        assert!(route_access("/portal/sales/reports").is_none());
        assert!(route_access("").is_none());
    }

    #[test]
    fn test_default_routes_are_in_table() {
        for role in Role::all() {
            let route = default_route(role);
            assert!(
                matches!(route_access(route), Some(RouteAccess::Requires(_))),
                "default route {route} of {role} is not a protected table entry"
            );
        }
    }

    #[test]
    fn test_route_access_serde() {
        let json = serde_json::to_value(RouteAccess::Requires(Capability::ViewLeads)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "access": "requires", "capability": "viewLeads" })
        );

        let json = serde_json::to_value(RouteAccess::Public).unwrap();
        assert_eq!(json, serde_json::json!({ "access": "public" }));
    }
}
