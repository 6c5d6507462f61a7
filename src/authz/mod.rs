//! Authorization module - Permission table and resolver
//!
//! This module implements the role-based access rules for:
//! - Route visibility (which pages a role can open)
//! - Service actions (create / edit / delete per category)
//! - Named actions (report generation, PQR management, financial figures)
//! - Report visibility by each report's access roles
//!
//! Every check fails closed: an unknown role, route or action is denied.

mod evaluator;
mod session;
mod table;

pub use evaluator::{visible_reports, AccessControlled, AccessPolicy, Resolver};
pub use session::Session;
pub use table::{PermissionTable, PermissionTableBuilder};

/// Well-known route names
pub mod routes {
    pub const DASHBOARD: &str = "dashboard";
    pub const CLINIC_SERVICES: &str = "clinic-services";
    pub const HOTEL_SERVICES: &str = "hotel-services";
    pub const SPA_SERVICES: &str = "spa-services";
    pub const PRICING: &str = "pricing";
    pub const REPORTS: &str = "reports";
    pub const PQRS: &str = "pqrs";

    pub const ALL: [&str; 7] = [
        DASHBOARD,
        CLINIC_SERVICES,
        HOTEL_SERVICES,
        SPA_SERVICES,
        PRICING,
        REPORTS,
        PQRS,
    ];
}

/// Well-known action names
pub mod actions {
    // Reports
    pub const REPORTS_GENERATE: &str = "reports.generate";
    pub const REPORTS_CREATE: &str = "reports.create";

    // PQRs
    pub const PQRS_MANAGE: &str = "pqrs.manage";

    // Dashboard
    pub const DASHBOARD_FINANCIALS: &str = "dashboard.financials";

    pub const ALL: [&str; 4] = [
        REPORTS_GENERATE,
        REPORTS_CREATE,
        PQRS_MANAGE,
        DASHBOARD_FINANCIALS,
    ];
}
