//! Portal roles
//!
//! This module defines the six principal roles of the portal and their
//! coarse seniority ranks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RbacError;

/// Role assigned to an authenticated principal.
///
/// Roles carry a seniority [`rank`](Role::rank) for coarse comparisons, but
/// the rank says nothing about which capabilities a role holds. Two roles of
/// the same rank (`Employee`/`Sales`, `ProjectManager`/`Manager`) have
/// different permission profiles.
///
/// # Ranks
///
/// - **Client**: 1
/// - **Employee**, **Sales**: 2
/// - **ProjectManager**, **Manager**: 3
/// - **Admin**: 4
///
/// # Examples
///
/// ```
/// use portal_rbac::Role;
///
/// assert_eq!(Role::Sales.rank(), Role::Employee.rank());
/// assert!(Role::Admin.rank() > Role::Manager.rank());
/// assert_eq!(Role::ProjectManager.as_str(), "project_manager");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Customer of the installation company
    Client,

    /// Field technician or office staff
    Employee,

    /// Sales representative working leads and quotes
    Sales,

    /// Runs installation projects, crews and inventory
    ProjectManager,

    /// Operations manager
    Manager,

    /// Full system control
    Admin,
}

/// The `(role, rank)` hierarchy table, ordered by rank.
pub const ROLE_HIERARCHY: [(Role, u8); 6] = [
    (Role::Client, 1),
    (Role::Employee, 2),
    (Role::Sales, 2),
    (Role::ProjectManager, 3),
    (Role::Manager, 3),
    (Role::Admin, 4),
];

impl Role {
    /// Get the seniority rank of this role.
    ///
    /// Ranks tie across roles; use them only for coarse gating.
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Client => 1,
            Self::Employee | Self::Sales => 2,
            Self::ProjectManager | Self::Manager => 3,
            Self::Admin => 4,
        }
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - Wire name to parse (exact match, as stored in tokens)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_rbac::Role;
    ///
    /// assert_eq!(Role::parse("admin"), Some(Role::Admin));
    /// assert_eq!(Role::parse("project_manager"), Some(Role::ProjectManager));
    /// assert_eq!(Role::parse("Project-Manager"), None);
    /// assert_eq!(Role::parse("owner"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "client" => Some(Self::Client),
            "employee" => Some(Self::Employee),
            "sales" => Some(Self::Sales),
            "project_manager" => Some(Self::ProjectManager),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Get string representation of the role.
    ///
    /// This is the wire value stored in sessions and tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Employee => "employee",
            Self::Sales => "sales",
            Self::ProjectManager => "project_manager",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_rbac::Role;
    ///
    /// assert_eq!(Role::ProjectManager.display_name(), "Project Manager");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Employee => "Employee",
            Self::Sales => "Sales",
            Self::ProjectManager => "Project Manager",
            Self::Manager => "Manager",
            Self::Admin => "Admin",
        }
    }

    /// Get all roles.
    pub fn all() -> [Self; 6] {
        [
            Self::Client,
            Self::Employee,
            Self::Sales,
            Self::ProjectManager,
            Self::Manager,
            Self::Admin,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RbacError::UnknownRole(s.to_string()))
    }
}

/// Get the role hierarchy table.
pub fn role_hierarchy() -> &'static [(Role, u8)] {
    &ROLE_HIERARCHY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ranks() {
        assert_eq!(Role::Client.rank(), 1);
        assert_eq!(Role::Employee.rank(), 2);
        assert_eq!(Role::Sales.rank(), 2);
        assert_eq!(Role::ProjectManager.rank(), 3);
        assert_eq!(Role::Manager.rank(), 3);
        assert_eq!(Role::Admin.rank(), 4);
    }

    #[test]
    fn test_hierarchy_table_matches_rank() {
        for (role, rank) in role_hierarchy() {
            assert_eq!(role.rank(), *rank, "rank mismatch for {role}");
        }
        assert_eq!(role_hierarchy().len(), Role::all().len());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("client"), Some(Role::Client));
        assert_eq!(Role::parse("project_manager"), Some(Role::ProjectManager));
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn test_role_parse_matches_wire_names_exactly() {
        for raw in ["SALES", "Admin", " client", "manager ", "project-manager", " Project-Manager "] {
            assert_eq!(Role::parse(raw), None, "{raw:?}");
            assert!(raw.parse::<Role>().is_err());
            assert!(serde_json::from_value::<Role>(serde_json::Value::String(raw.to_string())).is_err());
        }
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        let err = "owner".parse::<Role>().unwrap_err();
        assert!(matches!(err, RbacError::UnknownRole(ref s) if s == "owner"));
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
    }

    #[test]
    fn test_role_wire_names_round_trip_through_parse() {
        for role in Role::all() {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::ProjectManager).unwrap();
        assert_eq!(json, "\"project_manager\"");

        let role: Role = serde_json::from_str("\"sales\"").unwrap();
        assert_eq!(role, Role::Sales);

        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
    }
}
