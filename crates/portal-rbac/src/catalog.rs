//! # Permission Catalog
//!
//! The role × capability matrix. Each role has one flat profile assigning
//! every capability explicitly; nothing is inherited from another role or
//! derived from the role's rank.
//!
//! A profile is a plain struct with one `bool` per capability, so a profile
//! that forgets a flag does not compile. Adding a capability means adding a
//! field here and deciding its value in all six rows.

use serde::{Deserialize, Serialize};

use crate::capabilities::Capability;
use crate::roles::Role;

/// The complete capability assignment for one role.
///
/// Serializes as a camelCase `{ "viewAllProjects": true, ... }` map, which is
/// the shape UI components use to decide which actions to render.
///
/// # Example
///
/// ```
/// use portal_rbac::{catalog, Capability, Role};
///
/// let profile = catalog::profile(Role::Client);
/// assert!(profile.get(Capability::ViewOwnProjects));
/// assert!(!profile.get(Capability::ViewAllProjects));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PermissionProfile {
    pub access_client_portal: bool,
    pub access_employee_portal: bool,
    pub access_sales_portal: bool,
    pub access_manager_portal: bool,
    pub access_project_manager_portal: bool,
    pub access_admin_portal: bool,
    pub view_dashboard: bool,
    pub view_own_projects: bool,
    pub view_all_projects: bool,
    pub create_projects: bool,
    pub edit_projects: bool,
    pub delete_projects: bool,
    pub view_clients: bool,
    pub manage_clients: bool,
    pub view_leads: bool,
    pub manage_leads: bool,
    pub convert_leads: bool,
    pub view_own_quotes: bool,
    pub view_all_quotes: bool,
    pub create_quotes: bool,
    pub approve_quotes: bool,
    pub view_own_invoices: bool,
    pub view_all_invoices: bool,
    pub manage_invoices: bool,
    pub view_financial: bool,
    pub manage_financial: bool,
    pub create_tickets: bool,
    pub view_own_tickets: bool,
    pub view_all_tickets: bool,
    pub manage_tickets: bool,
    pub submit_reports: bool,
    pub view_reports: bool,
    pub approve_reports: bool,
    pub submit_referrals: bool,
    pub view_referrals: bool,
    pub manage_referrals: bool,
    pub view_inventory: bool,
    pub manage_inventory: bool,
    pub view_schedule: bool,
    pub manage_schedule: bool,
    pub view_employees: bool,
    pub manage_employees: bool,
    pub manage_users: bool,
    pub view_analytics: bool,
    pub export_data: bool,
    pub manage_settings: bool,
    pub manage_system: bool,
}

impl PermissionProfile {
    /// Get the stored flag for a capability.
    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::AccessClientPortal => self.access_client_portal,
            Capability::AccessEmployeePortal => self.access_employee_portal,
            Capability::AccessSalesPortal => self.access_sales_portal,
            Capability::AccessManagerPortal => self.access_manager_portal,
            Capability::AccessProjectManagerPortal => self.access_project_manager_portal,
            Capability::AccessAdminPortal => self.access_admin_portal,
            Capability::ViewDashboard => self.view_dashboard,
            Capability::ViewOwnProjects => self.view_own_projects,
            Capability::ViewAllProjects => self.view_all_projects,
            Capability::CreateProjects => self.create_projects,
            Capability::EditProjects => self.edit_projects,
            Capability::DeleteProjects => self.delete_projects,
            Capability::ViewClients => self.view_clients,
            Capability::ManageClients => self.manage_clients,
            Capability::ViewLeads => self.view_leads,
            Capability::ManageLeads => self.manage_leads,
            Capability::ConvertLeads => self.convert_leads,
            Capability::ViewOwnQuotes => self.view_own_quotes,
            Capability::ViewAllQuotes => self.view_all_quotes,
            Capability::CreateQuotes => self.create_quotes,
            Capability::ApproveQuotes => self.approve_quotes,
            Capability::ViewOwnInvoices => self.view_own_invoices,
            Capability::ViewAllInvoices => self.view_all_invoices,
            Capability::ManageInvoices => self.manage_invoices,
            Capability::ViewFinancial => self.view_financial,
            Capability::ManageFinancial => self.manage_financial,
            Capability::CreateTickets => self.create_tickets,
            Capability::ViewOwnTickets => self.view_own_tickets,
            Capability::ViewAllTickets => self.view_all_tickets,
            Capability::ManageTickets => self.manage_tickets,
            Capability::SubmitReports => self.submit_reports,
            Capability::ViewReports => self.view_reports,
            Capability::ApproveReports => self.approve_reports,
            Capability::SubmitReferrals => self.submit_referrals,
            Capability::ViewReferrals => self.view_referrals,
            Capability::ManageReferrals => self.manage_referrals,
            Capability::ViewInventory => self.view_inventory,
            Capability::ManageInventory => self.manage_inventory,
            Capability::ViewSchedule => self.view_schedule,
            Capability::ManageSchedule => self.manage_schedule,
            Capability::ViewEmployees => self.view_employees,
            Capability::ManageEmployees => self.manage_employees,
            Capability::ManageUsers => self.manage_users,
            Capability::ViewAnalytics => self.view_analytics,
            Capability::ExportData => self.export_data,
            Capability::ManageSettings => self.manage_settings,
            Capability::ManageSystem => self.manage_system,
        }
    }

    /// Get every capability this profile grants, in catalog order.
    pub fn granted(&self) -> Vec<Capability> {
        Capability::all()
            .iter()
            .copied()
            .filter(|c| self.get(*c))
            .collect()
    }

    /// Count the granted capabilities.
    pub fn granted_count(&self) -> usize {
        Capability::all().iter().filter(|c| self.get(**c)).count()
    }

    /// Check if this profile grants everything `other` grants.
    pub fn is_superset_of(&self, other: &PermissionProfile) -> bool {
        self.missing_from(other).is_empty()
    }

    /// Capabilities granted by `other` but not by this profile.
    ///
    /// # Example
    ///
    /// ```
    /// use portal_rbac::{catalog, Capability, Role};
    ///
    /// let sales = catalog::profile(Role::Sales);
    /// let pm = catalog::profile(Role::ProjectManager);
    /// assert!(pm.missing_from(sales).contains(&Capability::ViewLeads));
    /// ```
    pub fn missing_from(&self, other: &PermissionProfile) -> Vec<Capability> {
        Capability::all()
            .iter()
            .copied()
            .filter(|c| other.get(*c) && !self.get(*c))
            .collect()
    }
}

/// Customers: their own projects, quotes, invoices and tickets.
pub const CLIENT_PROFILE: PermissionProfile = PermissionProfile {
    access_client_portal: true,
    access_employee_portal: false,
    access_sales_portal: false,
    access_manager_portal: false,
    access_project_manager_portal: false,
    access_admin_portal: false,
    view_dashboard: true,
    view_own_projects: true,
    view_all_projects: false,
    create_projects: false,
    edit_projects: false,
    delete_projects: false,
    view_clients: false,
    manage_clients: false,
    view_leads: false,
    manage_leads: false,
    convert_leads: false,
    view_own_quotes: true,
    view_all_quotes: false,
    create_quotes: false,
    approve_quotes: false,
    view_own_invoices: true,
    view_all_invoices: false,
    manage_invoices: false,
    view_financial: false,
    manage_financial: false,
    create_tickets: true,
    view_own_tickets: true,
    view_all_tickets: false,
    manage_tickets: false,
    submit_reports: false,
    view_reports: false,
    approve_reports: false,
    submit_referrals: true,
    view_referrals: false,
    manage_referrals: false,
    view_inventory: false,
    manage_inventory: false,
    view_schedule: false,
    manage_schedule: false,
    view_employees: false,
    manage_employees: false,
    manage_users: false,
    view_analytics: false,
    export_data: false,
    manage_settings: false,
    manage_system: false,
};

/// Field and office staff: reports, tickets, schedule and inventory lookups.
pub const EMPLOYEE_PROFILE: PermissionProfile = PermissionProfile {
    access_client_portal: false,
    access_employee_portal: true,
    access_sales_portal: false,
    access_manager_portal: false,
    access_project_manager_portal: false,
    access_admin_portal: false,
    view_dashboard: true,
    view_own_projects: true,
    view_all_projects: false,
    create_projects: false,
    edit_projects: false,
    delete_projects: false,
    view_clients: false,
    manage_clients: false,
    view_leads: false,
    manage_leads: false,
    convert_leads: false,
    view_own_quotes: false,
    view_all_quotes: false,
    create_quotes: false,
    approve_quotes: false,
    view_own_invoices: false,
    view_all_invoices: false,
    manage_invoices: false,
    view_financial: false,
    manage_financial: false,
    create_tickets: true,
    view_own_tickets: true,
    view_all_tickets: false,
    manage_tickets: false,
    submit_reports: true,
    view_reports: false,
    approve_reports: false,
    submit_referrals: true,
    view_referrals: false,
    manage_referrals: false,
    view_inventory: true,
    manage_inventory: false,
    view_schedule: true,
    manage_schedule: false,
    view_employees: false,
    manage_employees: false,
    manage_users: false,
    view_analytics: false,
    export_data: false,
    manage_settings: false,
    manage_system: false,
};

/// Sales representatives: leads, clients and quotes. No financials, no inventory.
pub const SALES_PROFILE: PermissionProfile = PermissionProfile {
    access_client_portal: false,
    access_employee_portal: false,
    access_sales_portal: true,
    access_manager_portal: false,
    access_project_manager_portal: false,
    access_admin_portal: false,
    view_dashboard: true,
    view_own_projects: true,
    view_all_projects: false,
    create_projects: false,
    edit_projects: false,
    delete_projects: false,
    view_clients: true,
    manage_clients: true,
    view_leads: true,
    manage_leads: true,
    convert_leads: true,
    view_own_quotes: true,
    view_all_quotes: false,
    create_quotes: true,
    approve_quotes: false,
    view_own_invoices: true,
    view_all_invoices: false,
    manage_invoices: false,
    view_financial: false,
    manage_financial: false,
    create_tickets: true,
    view_own_tickets: true,
    view_all_tickets: false,
    manage_tickets: false,
    submit_reports: true,
    view_reports: false,
    approve_reports: false,
    submit_referrals: true,
    view_referrals: true,
    manage_referrals: false,
    view_inventory: false,
    manage_inventory: false,
    view_schedule: true,
    manage_schedule: false,
    view_employees: false,
    manage_employees: false,
    manage_users: false,
    view_analytics: false,
    export_data: false,
    manage_settings: false,
    manage_system: false,
};

/// Project managers: projects, crews, tickets and inventory. No leads.
pub const PROJECT_MANAGER_PROFILE: PermissionProfile = PermissionProfile {
    access_client_portal: false,
    access_employee_portal: true,
    access_sales_portal: false,
    access_manager_portal: false,
    access_project_manager_portal: true,
    access_admin_portal: false,
    view_dashboard: true,
    view_own_projects: true,
    view_all_projects: true,
    create_projects: true,
    edit_projects: true,
    delete_projects: false,
    view_clients: true,
    manage_clients: false,
    view_leads: false,
    manage_leads: false,
    convert_leads: false,
    view_own_quotes: false,
    view_all_quotes: true,
    create_quotes: false,
    approve_quotes: false,
    view_own_invoices: false,
    view_all_invoices: false,
    manage_invoices: false,
    view_financial: false,
    manage_financial: false,
    create_tickets: true,
    view_own_tickets: true,
    view_all_tickets: true,
    manage_tickets: true,
    submit_reports: true,
    view_reports: true,
    approve_reports: true,
    submit_referrals: true,
    view_referrals: false,
    manage_referrals: false,
    view_inventory: true,
    manage_inventory: true,
    view_schedule: true,
    manage_schedule: true,
    view_employees: true,
    manage_employees: false,
    manage_users: false,
    view_analytics: false,
    export_data: false,
    manage_settings: false,
    manage_system: false,
};

/// Operations managers.
pub const MANAGER_PROFILE: PermissionProfile = PermissionProfile {
    access_client_portal: false,
    access_employee_portal: true,
    access_sales_portal: false,
    access_manager_portal: true,
    access_project_manager_portal: false,
    access_admin_portal: false,
    view_dashboard: true,
    view_own_projects: true,
    view_all_projects: true,
    create_projects: true,
    edit_projects: true,
    delete_projects: true,
    view_clients: true,
    manage_clients: false,
    view_leads: true,
    manage_leads: false,
    convert_leads: false,
    view_own_quotes: false,
    view_all_quotes: true,
    create_quotes: false,
    approve_quotes: false,
    view_own_invoices: false,
    view_all_invoices: true,
    manage_invoices: false,
    view_financial: true,
    manage_financial: false,
    create_tickets: true,
    view_own_tickets: true,
    view_all_tickets: true,
    manage_tickets: true,
    submit_reports: true,
    view_reports: true,
    approve_reports: true,
    submit_referrals: true,
    view_referrals: true,
    manage_referrals: true,
    view_inventory: true,
    manage_inventory: true,
    view_schedule: true,
    manage_schedule: true,
    view_employees: true,
    manage_employees: true,
    manage_users: false,
    view_analytics: true,
    export_data: true,
    manage_settings: false,
    manage_system: false,
};

/// Administrators: every capability.
pub const ADMIN_PROFILE: PermissionProfile = PermissionProfile {
    access_client_portal: true,
    access_employee_portal: true,
    access_sales_portal: true,
    access_manager_portal: true,
    access_project_manager_portal: true,
    access_admin_portal: true,
    view_dashboard: true,
    view_own_projects: true,
    view_all_projects: true,
    create_projects: true,
    edit_projects: true,
    delete_projects: true,
    view_clients: true,
    manage_clients: true,
    view_leads: true,
    manage_leads: true,
    convert_leads: true,
    view_own_quotes: true,
    view_all_quotes: true,
    create_quotes: true,
    approve_quotes: true,
    view_own_invoices: true,
    view_all_invoices: true,
    manage_invoices: true,
    view_financial: true,
    manage_financial: true,
    create_tickets: true,
    view_own_tickets: true,
    view_all_tickets: true,
    manage_tickets: true,
    submit_reports: true,
    view_reports: true,
    approve_reports: true,
    submit_referrals: true,
    view_referrals: true,
    manage_referrals: true,
    view_inventory: true,
    manage_inventory: true,
    view_schedule: true,
    manage_schedule: true,
    view_employees: true,
    manage_employees: true,
    manage_users: true,
    view_analytics: true,
    export_data: true,
    manage_settings: true,
    manage_system: true,
};

/// Get the permission profile of a role.
///
/// Total over [`Role`]: a role without a profile is a compile error.
pub fn profile(role: Role) -> &'static PermissionProfile {
    match role {
        Role::Client => &CLIENT_PROFILE,
        Role::Employee => &EMPLOYEE_PROFILE,
        Role::Sales => &SALES_PROFILE,
        Role::ProjectManager => &PROJECT_MANAGER_PROFILE,
        Role::Manager => &MANAGER_PROFILE,
        Role::Admin => &ADMIN_PROFILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_lookup_is_total() {
        for role in Role::all() {
            let p = profile(role);
            for cap in Capability::all() {
                let _ = p.get(*cap);
            }
        }
    }

    #[test]
    fn test_admin_grants_everything() {
        assert_eq!(ADMIN_PROFILE.granted_count(), Capability::all().len());
    }

    #[test]
    fn test_client_profile() {
        let granted = CLIENT_PROFILE.granted();
        assert_eq!(
            granted,
            vec![
                Capability::AccessClientPortal,
                Capability::ViewDashboard,
                Capability::ViewOwnProjects,
                Capability::ViewOwnQuotes,
                Capability::ViewOwnInvoices,
                Capability::CreateTickets,
                Capability::ViewOwnTickets,
                Capability::SubmitReferrals,
            ]
        );
    }

    #[test]
    fn test_sales_and_project_manager_are_disjoint_where_it_matters() {
        assert!(SALES_PROFILE.view_leads);
        assert!(SALES_PROFILE.manage_leads);
        assert!(!SALES_PROFILE.view_financial);
        assert!(!SALES_PROFILE.manage_inventory);

        assert!(PROJECT_MANAGER_PROFILE.manage_inventory);
        assert!(!PROJECT_MANAGER_PROFILE.view_leads);
    }

    #[test]
    fn test_manager_and_project_manager_differ() {
        assert_ne!(MANAGER_PROFILE, PROJECT_MANAGER_PROFILE);
        assert!(MANAGER_PROFILE.access_manager_portal);
        assert!(!MANAGER_PROFILE.access_project_manager_portal);
        assert!(PROJECT_MANAGER_PROFILE.access_project_manager_portal);
        assert!(!PROJECT_MANAGER_PROFILE.access_manager_portal);
    }

    #[test]
    fn test_missing_from() {
        let missing = CLIENT_PROFILE.missing_from(&EMPLOYEE_PROFILE);
        assert!(missing.contains(&Capability::SubmitReports));
        assert!(!missing.contains(&Capability::ViewOwnProjects));
        assert!(ADMIN_PROFILE.missing_from(&MANAGER_PROFILE).is_empty());
        assert!(ADMIN_PROFILE.is_superset_of(&MANAGER_PROFILE));
        assert!(!MANAGER_PROFILE.is_superset_of(&ADMIN_PROFILE));
    }

    #[test]
    fn test_profile_serializes_as_camel_case_map() {
        let value = serde_json::to_value(profile(Role::Sales)).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), Capability::all().len());
        assert_eq!(map["viewLeads"], serde_json::Value::Bool(true));
        assert_eq!(map["viewFinancial"], serde_json::Value::Bool(false));

        for cap in Capability::all() {
            assert!(map.contains_key(cap.as_str()), "missing key {cap}");
        }
    }

    #[test]
    fn test_partial_profile_is_rejected() {
        let json = serde_json::json!({ "viewDashboard": true });
        assert!(serde_json::from_value::<PermissionProfile>(json).is_err());
    }
}
