//! # Capabilities
//!
//! Defines every capability flag the portal checks.
//! A capability is one unit of authorization, e.g. "view all projects".
//! The set is closed: adding a flag means adding a variant here and a value
//! for it in every profile of the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RbacError;

/// Functional area a capability belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityGroup {
    /// Role-specific portal entry points.
    Portals,
    /// Shared landing dashboard.
    Dashboard,
    /// Installation projects.
    Projects,
    /// Clients and sales leads.
    Clients,
    /// Quotes sent to clients.
    Quotes,
    /// Invoices.
    Invoices,
    /// Company-wide financial data.
    Financial,
    /// Support and service tickets.
    Tickets,
    /// Field and work reports.
    Reports,
    /// Client referrals.
    Referrals,
    /// Equipment inventory.
    Inventory,
    /// Crew and job scheduling.
    Schedule,
    /// Employees and user accounts.
    Team,
    /// Visitor analytics and data export.
    Analytics,
    /// System configuration.
    System,
}

impl CapabilityGroup {
    /// Get the string representation of the group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portals => "portals",
            Self::Dashboard => "dashboard",
            Self::Projects => "projects",
            Self::Clients => "clients",
            Self::Quotes => "quotes",
            Self::Invoices => "invoices",
            Self::Financial => "financial",
            Self::Tickets => "tickets",
            Self::Reports => "reports",
            Self::Referrals => "referrals",
            Self::Inventory => "inventory",
            Self::Schedule => "schedule",
            Self::Team => "team",
            Self::Analytics => "analytics",
            Self::System => "system",
        }
    }
}

/// A named boolean permission flag.
///
/// Wire names are camelCase (`viewAllProjects`), matching the keys the UI
/// layer receives in a serialized
/// [`PermissionProfile`](crate::catalog::PermissionProfile).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    // Portals
    AccessClientPortal,
    AccessEmployeePortal,
    AccessSalesPortal,
    AccessManagerPortal,
    AccessProjectManagerPortal,
    AccessAdminPortal,

    // Dashboard
    ViewDashboard,

    // Projects
    ViewOwnProjects,
    ViewAllProjects,
    CreateProjects,
    EditProjects,
    DeleteProjects,

    // Clients & leads
    ViewClients,
    ManageClients,
    ViewLeads,
    ManageLeads,
    ConvertLeads,

    // Quotes
    ViewOwnQuotes,
    ViewAllQuotes,
    CreateQuotes,
    ApproveQuotes,

    // Invoices
    ViewOwnInvoices,
    ViewAllInvoices,
    ManageInvoices,

    // Financial
    ViewFinancial,
    ManageFinancial,

    // Tickets
    CreateTickets,
    ViewOwnTickets,
    ViewAllTickets,
    ManageTickets,

    // Reports
    SubmitReports,
    ViewReports,
    ApproveReports,

    // Referrals
    SubmitReferrals,
    ViewReferrals,
    ManageReferrals,

    // Inventory
    ViewInventory,
    ManageInventory,

    // Schedule
    ViewSchedule,
    ManageSchedule,

    // Team
    ViewEmployees,
    ManageEmployees,
    ManageUsers,

    // Analytics
    ViewAnalytics,
    ExportData,

    // System
    ManageSettings,
    ManageSystem,
}

/// Every capability, in catalog order.
pub const ALL_CAPABILITIES: [Capability; 47] = [
    Capability::AccessClientPortal,
    Capability::AccessEmployeePortal,
    Capability::AccessSalesPortal,
    Capability::AccessManagerPortal,
    Capability::AccessProjectManagerPortal,
    Capability::AccessAdminPortal,
    Capability::ViewDashboard,
    Capability::ViewOwnProjects,
    Capability::ViewAllProjects,
    Capability::CreateProjects,
    Capability::EditProjects,
    Capability::DeleteProjects,
    Capability::ViewClients,
    Capability::ManageClients,
    Capability::ViewLeads,
    Capability::ManageLeads,
    Capability::ConvertLeads,
    Capability::ViewOwnQuotes,
    Capability::ViewAllQuotes,
    Capability::CreateQuotes,
    Capability::ApproveQuotes,
    Capability::ViewOwnInvoices,
    Capability::ViewAllInvoices,
    Capability::ManageInvoices,
    Capability::ViewFinancial,
    Capability::ManageFinancial,
    Capability::CreateTickets,
    Capability::ViewOwnTickets,
    Capability::ViewAllTickets,
    Capability::ManageTickets,
    Capability::SubmitReports,
    Capability::ViewReports,
    Capability::ApproveReports,
    Capability::SubmitReferrals,
    Capability::ViewReferrals,
    Capability::ManageReferrals,
    Capability::ViewInventory,
    Capability::ManageInventory,
    Capability::ViewSchedule,
    Capability::ManageSchedule,
    Capability::ViewEmployees,
    Capability::ManageEmployees,
    Capability::ManageUsers,
    Capability::ViewAnalytics,
    Capability::ExportData,
    Capability::ManageSettings,
    Capability::ManageSystem,
];

impl Capability {
    /// Get the camelCase wire name of the capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessClientPortal => "accessClientPortal",
            Self::AccessEmployeePortal => "accessEmployeePortal",
            Self::AccessSalesPortal => "accessSalesPortal",
            Self::AccessManagerPortal => "accessManagerPortal",
            Self::AccessProjectManagerPortal => "accessProjectManagerPortal",
            Self::AccessAdminPortal => "accessAdminPortal",
            Self::ViewDashboard => "viewDashboard",
            Self::ViewOwnProjects => "viewOwnProjects",
            Self::ViewAllProjects => "viewAllProjects",
            Self::CreateProjects => "createProjects",
            Self::EditProjects => "editProjects",
            Self::DeleteProjects => "deleteProjects",
            Self::ViewClients => "viewClients",
            Self::ManageClients => "manageClients",
            Self::ViewLeads => "viewLeads",
            Self::ManageLeads => "manageLeads",
            Self::ConvertLeads => "convertLeads",
            Self::ViewOwnQuotes => "viewOwnQuotes",
            Self::ViewAllQuotes => "viewAllQuotes",
            Self::CreateQuotes => "createQuotes",
            Self::ApproveQuotes => "approveQuotes",
            Self::ViewOwnInvoices => "viewOwnInvoices",
            Self::ViewAllInvoices => "viewAllInvoices",
            Self::ManageInvoices => "manageInvoices",
            Self::ViewFinancial => "viewFinancial",
            Self::ManageFinancial => "manageFinancial",
            Self::CreateTickets => "createTickets",
            Self::ViewOwnTickets => "viewOwnTickets",
            Self::ViewAllTickets => "viewAllTickets",
            Self::ManageTickets => "manageTickets",
            Self::SubmitReports => "submitReports",
            Self::ViewReports => "viewReports",
            Self::ApproveReports => "approveReports",
            Self::SubmitReferrals => "submitReferrals",
            Self::ViewReferrals => "viewReferrals",
            Self::ManageReferrals => "manageReferrals",
            Self::ViewInventory => "viewInventory",
            Self::ManageInventory => "manageInventory",
            Self::ViewSchedule => "viewSchedule",
            Self::ManageSchedule => "manageSchedule",
            Self::ViewEmployees => "viewEmployees",
            Self::ManageEmployees => "manageEmployees",
            Self::ManageUsers => "manageUsers",
            Self::ViewAnalytics => "viewAnalytics",
            Self::ExportData => "exportData",
            Self::ManageSettings => "manageSettings",
            Self::ManageSystem => "manageSystem",
        }
    }

    /// Parse a capability from its camelCase wire name.
    ///
    /// Matching is exact. Unlike role names, capability keys are compared
    /// verbatim so a typo in a caller never resolves to a different flag.
    ///
    /// # Example
    ///
    /// ```
    /// use portal_rbac::Capability;
    ///
    /// assert_eq!(Capability::parse("viewLeads"), Some(Capability::ViewLeads));
    /// assert_eq!(Capability::parse("viewleads"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        ALL_CAPABILITIES.iter().copied().find(|c| c.as_str() == s)
    }

    /// Get all capabilities.
    pub fn all() -> &'static [Self] {
        &ALL_CAPABILITIES
    }

    /// Get the functional area this capability belongs to.
    pub fn group(&self) -> CapabilityGroup {
        match self {
            Self::AccessClientPortal
            | Self::AccessEmployeePortal
            | Self::AccessSalesPortal
            | Self::AccessManagerPortal
            | Self::AccessProjectManagerPortal
            | Self::AccessAdminPortal => CapabilityGroup::Portals,
            Self::ViewDashboard => CapabilityGroup::Dashboard,
            Self::ViewOwnProjects
            | Self::ViewAllProjects
            | Self::CreateProjects
            | Self::EditProjects
            | Self::DeleteProjects => CapabilityGroup::Projects,
            Self::ViewClients
            | Self::ManageClients
            | Self::ViewLeads
            | Self::ManageLeads
            | Self::ConvertLeads => CapabilityGroup::Clients,
            Self::ViewOwnQuotes | Self::ViewAllQuotes | Self::CreateQuotes | Self::ApproveQuotes => {
                CapabilityGroup::Quotes
            }
            Self::ViewOwnInvoices | Self::ViewAllInvoices | Self::ManageInvoices => {
                CapabilityGroup::Invoices
            }
            Self::ViewFinancial | Self::ManageFinancial => CapabilityGroup::Financial,
            Self::CreateTickets | Self::ViewOwnTickets | Self::ViewAllTickets | Self::ManageTickets => {
                CapabilityGroup::Tickets
            }
            Self::SubmitReports | Self::ViewReports | Self::ApproveReports => CapabilityGroup::Reports,
            Self::SubmitReferrals | Self::ViewReferrals | Self::ManageReferrals => {
                CapabilityGroup::Referrals
            }
            Self::ViewInventory | Self::ManageInventory => CapabilityGroup::Inventory,
            Self::ViewSchedule | Self::ManageSchedule => CapabilityGroup::Schedule,
            Self::ViewEmployees | Self::ManageEmployees | Self::ManageUsers => CapabilityGroup::Team,
            Self::ViewAnalytics | Self::ExportData => CapabilityGroup::Analytics,
            Self::ManageSettings | Self::ManageSystem => CapabilityGroup::System,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RbacError::UnknownCapability(s.to_string()))
    }
}
