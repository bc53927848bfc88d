//! Property tests for the portal permission model.
//!
//! These tests walk the whole Role × Capability and Role × Route space
//! and check the invariants route guards and UI components rely on:
//! totality, deny-by-default, public routes, rank transitivity, and the
//! independence of capability profiles from rank.

use portal_rbac::{
    can_access_route, can_access_route_as, catalog, default_route, has_minimum_role,
    has_permission, role_hierarchy, routes, Capability, Role,
};
use std::sync::Arc;

/// Paths that look plausible but are not in the route table.
const UNMAPPED_PATHS: &[&str] = &[
    "",
    "/admin/",
    "/admin/users",
    "/portal",
    "/portal/",
    "/portal/sales/",
    "/portal/Sales",
    "/Dashboard",
    "/dashboard?tab=leads",
    "//",
    "/home/",
    "*",
    "/.*",
    "/leads/123",
    "/visitor-analytics",
];

#[test]
fn every_role_answers_every_capability() {
    let mut answers = 0;
    for role in Role::all() {
        for cap in Capability::all() {
            let direct = has_permission(role, *cap);
            assert_eq!(direct, catalog::profile(role).get(*cap));
            answers += 1;
        }
    }
    assert_eq!(answers, Role::all().len() * Capability::all().len());
}

#[test]
fn unmapped_paths_are_denied_for_every_role() {
    for path in UNMAPPED_PATHS {
        assert!(routes::route_access(path).is_none(), "{path:?} is mapped");
        for role in Role::all() {
            assert!(
                !can_access_route(role, path),
                "{role} reached unmapped path {path:?}"
            );
        }
        assert!(!can_access_route_as(None, path));
    }
}

#[test]
fn public_routes_are_open_to_everyone() {
    for path in ["/", "/home"] {
        for role in Role::all() {
            assert!(can_access_route(role, path));
        }
        assert!(can_access_route_as(None, path));
    }
}

#[test]
fn anonymous_callers_only_reach_public_routes() {
    for (path, _) in routes::routes() {
        assert_eq!(
            can_access_route_as(None, path),
            routes::is_public_route(path),
            "anonymous access mismatch on {path}"
        );
    }
}

#[test]
fn minimum_role_is_transitive() {
    let roles = Role::all();
    for a in roles {
        for b in roles {
            for c in roles {
                if has_minimum_role(a, b) && has_minimum_role(b, c) {
                    assert!(has_minimum_role(a, c), "{a} >= {b} >= {c} but not {a} >= {c}");
                }
            }
        }
    }
}

#[test]
fn minimum_role_is_reflexive_and_total() {
    for a in Role::all() {
        assert!(has_minimum_role(a, a));
        for b in Role::all() {
            assert!(has_minimum_role(a, b) || has_minimum_role(b, a));
        }
    }
}

#[test]
fn hierarchy_ranks_follow_seniority() {
    let rank = |role: Role| {
        role_hierarchy()
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, rank)| *rank)
            .unwrap()
    };
    assert!(rank(Role::Client) < rank(Role::Employee));
    assert_eq!(rank(Role::Employee), rank(Role::Sales));
    assert!(rank(Role::Sales) < rank(Role::ProjectManager));
    assert_eq!(rank(Role::ProjectManager), rank(Role::Manager));
    assert!(rank(Role::Manager) < rank(Role::Admin));
}

#[test]
fn equal_rank_does_not_mean_equal_profile() {
    assert_ne!(catalog::profile(Role::Sales), catalog::profile(Role::ProjectManager));
    assert_ne!(catalog::profile(Role::Employee), catalog::profile(Role::Sales));
    assert_ne!(catalog::profile(Role::Manager), catalog::profile(Role::ProjectManager));

    assert!(has_permission(Role::Sales, Capability::ViewLeads));
    assert!(!has_permission(Role::ProjectManager, Capability::ViewLeads));
    assert!(has_permission(Role::ProjectManager, Capability::ManageInventory));
    assert!(!has_permission(Role::Sales, Capability::ManageInventory));
    assert!(!has_permission(Role::Sales, Capability::ViewFinancial));
}

#[test]
fn admin_covers_manager() {
    for cap in Capability::all() {
        if has_permission(Role::Manager, *cap) {
            assert!(has_permission(Role::Admin, *cap), "manager-only grant: {cap}");
        }
    }
}

#[test]
fn documented_scenarios() {
    assert!(!has_permission(Role::Client, Capability::ViewAllProjects));
    assert!(has_permission(Role::Client, Capability::ViewOwnProjects));

    assert!(has_permission(Role::Admin, Capability::ManageSystem));
    assert!(!has_permission(Role::Manager, Capability::ManageSystem));

    assert!(can_access_route(Role::Sales, "/portal/sales"));
    assert!(!can_access_route(Role::Client, "/portal/sales"));

    assert_eq!(default_route(Role::Sales), "/portal/sales");

    assert!(has_minimum_role(Role::Manager, Role::Employee));
    assert!(!has_minimum_role(Role::Employee, Role::Manager));
    assert!(has_minimum_role(Role::Sales, Role::Employee));
}

#[test]
fn every_role_reaches_its_landing_route() {
    for role in Role::all() {
        assert!(can_access_route(role, default_route(role)));
    }
}

#[test]
fn landing_routes_are_role_specific() {
    for role in Role::all() {
        for other in Role::all() {
            if role != other {
                assert_ne!(default_route(role), default_route(other));
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_queries_agree_with_sequential_answers() {
    let expected: Arc<Vec<(Role, Capability, bool)>> = Arc::new(
        Role::all()
            .iter()
            .flat_map(|role| {
                Capability::all()
                    .iter()
                    .map(move |cap| (*role, *cap, has_permission(*role, *cap)))
            })
            .collect(),
    );

    let mut handles = Vec::new();
    for _ in 0..16 {
        let expected = Arc::clone(&expected);
        handles.push(tokio::spawn(async move {
            for (role, cap, answer) in expected.iter() {
                assert_eq!(has_permission(*role, *cap), *answer);
                let _ = can_access_route(*role, default_route(*role));
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
}
