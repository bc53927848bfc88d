//! # Catalog audit
//!
//! Consistency checks over the catalog that the type system cannot express.
//! Findings are reported, never corrected: the catalog is authored by hand
//! and a finding may be intentional.

use serde::Serialize;

use crate::capabilities::Capability;
use crate::catalog;
use crate::evaluator;
use crate::roles::Role;
use crate::routes::{self, RouteAccess};

/// A single audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// `higher` lacks capabilities that `lower` holds.
    NotSuperset {
        /// Role expected to hold everything `lower` holds.
        higher: Role,
        /// Role whose grants should be covered.
        lower: Role,
        /// Capabilities held by `lower` only.
        missing: Vec<Capability>,
    },

    /// A role cannot open its own landing route.
    UnreachableDefaultRoute {
        /// Role with the unreachable landing route.
        role: Role,
        /// The landing route.
        route: &'static str,
    },

    /// A route requires a capability no role holds.
    DeadRoute {
        /// The route literal.
        route: &'static str,
        /// The capability nobody holds.
        capability: Capability,
    },
}

/// Result of [`check_catalog`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogReport {
    /// All findings, in check order.
    pub findings: Vec<Finding>,
}

impl CatalogReport {
    /// Check if the audit found nothing.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Capabilities granted to `lower` but not to `higher`.
pub fn superset_violations(higher: Role, lower: Role) -> Vec<Capability> {
    catalog::profile(higher).missing_from(catalog::profile(lower))
}

/// Run every catalog check.
///
/// Checks, in order:
/// 1. `Admin` holds everything `Manager` holds.
/// 2. Every role can open its own default route.
/// 3. Every protected route is reachable by at least one role.
pub fn check_catalog() -> CatalogReport {
    let mut report = CatalogReport::default();

    let missing = superset_violations(Role::Admin, Role::Manager);
    if !missing.is_empty() {
        report.findings.push(Finding::NotSuperset {
            higher: Role::Admin,
            lower: Role::Manager,
            missing,
        });
    }

    for role in Role::all() {
        let route = evaluator::default_route(role);
        if !evaluator::can_access_route(role, route) {
            report
                .findings
                .push(Finding::UnreachableDefaultRoute { role, route });
        }
    }

    for (route, access) in routes::routes() {
        if let RouteAccess::Requires(capability) = access {
            if !Role::all()
                .iter()
                .any(|r| evaluator::has_permission(*r, *capability))
            {
                report.findings.push(Finding::DeadRoute {
                    route: *route,
                    capability: *capability,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_catalog_is_clean() {
        let report = check_catalog();
        assert!(report.is_clean(), "findings: {:?}", report.findings);
    }

    #[test]
    fn test_superset_violations_reports_missing_grants() {
        assert!(superset_violations(Role::Admin, Role::Manager).is_empty());

        let missing = superset_violations(Role::ProjectManager, Role::Sales);
        assert!(missing.contains(&Capability::ViewLeads));
        assert!(missing.contains(&Capability::AccessSalesPortal));
        assert!(!missing.contains(&Capability::ViewDashboard));
    }

    #[test]
    fn test_finding_serialization() {
        let finding = Finding::DeadRoute {
            route: "/settings",
            capability: Capability::ManageSettings,
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["kind"], "dead_route");
        assert_eq!(json["capability"], "manageSettings");
    }
}
