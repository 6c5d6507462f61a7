//! View models consumed by a renderer.
//!
//! Permission-dependent branches are answered through an [`AccessPolicy`].
//! The one role comparison is the dashboard variant: guests get the public
//! overview whatever the table grants them.

use serde::Serialize;

use crate::authz::{actions, routes, AccessPolicy};
use crate::catalog::ServiceCatalog;
use crate::events::ActivityEntry;
use crate::models::{Pqr, Report, Role, Service, ServiceCategory, ServiceType};
use crate::pqrs::{PqrDesk, PqrFilter};
use crate::reports::{summarize, ReportBoard, ReportSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub route: &'static str,
}

const NAV_ITEMS: [NavItem; 7] = [
    NavItem { label: "Home", route: routes::DASHBOARD },
    NavItem { label: "Clinic Services", route: routes::CLINIC_SERVICES },
    NavItem { label: "Hotel Services", route: routes::HOTEL_SERVICES },
    NavItem { label: "Spa Services", route: routes::SPA_SERVICES },
    NavItem { label: "Pricing", route: routes::PRICING },
    NavItem { label: "Reports", route: routes::REPORTS },
    NavItem { label: "PQRs", route: routes::PQRS },
];

pub fn navigation<P: AccessPolicy + ?Sized>(policy: &P, role: Role) -> Vec<NavItem> {
    NAV_ITEMS
        .into_iter()
        .filter(|item| policy.can_access_route(role, item.route))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "route", rename_all = "snake_case")]
pub enum RouteDecision {
    Allow(String),
    /// Disallowed or unknown: send the user to their landing page.
    Redirect(&'static str),
}

impl RouteDecision {
    pub fn route(&self) -> &str {
        match self {
            RouteDecision::Allow(route) => route,
            RouteDecision::Redirect(route) => route,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteDecision::Allow(_))
    }
}

pub fn guard_route<P: AccessPolicy + ?Sized>(policy: &P, role: Role, requested: &str) -> RouteDecision {
    if policy.can_access_route(role, requested) {
        RouteDecision::Allow(requested.to_string())
    } else {
        RouteDecision::Redirect(policy.default_landing_route(role))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardVariant {
    Staff,
    /// Read-only overview of the service lines.
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: ServiceCategory,
    pub services: usize,
}

/// Price-list value of the available services, per line and in total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Financials {
    pub listed_total: f64,
    pub by_category: Vec<CategoryRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub category: ServiceCategory,
    pub amount: f64,
}

fn financials(catalog: &ServiceCatalog) -> Financials {
    let by_category: Vec<CategoryRevenue> = ServiceCategory::ALL
        .into_iter()
        .map(|category| CategoryRevenue {
            category,
            amount: catalog
                .available_by_category(category)
                .iter()
                .map(|s| s.price)
                .sum(),
        })
        .collect();

    Financials {
        listed_total: by_category.iter().map(|row| row.amount).sum(),
        by_category,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub role: Role,
    pub variant: DashboardVariant,
    /// Present only for roles holding `dashboard.financials`.
    pub financials: Option<Financials>,
    pub active_services: usize,
    pub open_pqrs: usize,
    pub service_breakdown: Vec<CategoryCount>,
    pub recent_activity: Vec<&'a ActivityEntry>,
    pub service_lines: Vec<ServiceCategory>,
}

pub fn dashboard<'a, P: AccessPolicy + ?Sized>(
    policy: &P,
    role: Role,
    catalog: &ServiceCatalog,
    desk: &PqrDesk,
    recent_activity: Vec<&'a ActivityEntry>,
) -> DashboardView<'a> {
    let active_services = catalog.all().iter().filter(|s| s.available).count();

    if role.is_public() {
        return DashboardView {
            role,
            variant: DashboardVariant::Public,
            financials: None,
            active_services,
            open_pqrs: 0,
            service_breakdown: Vec::new(),
            recent_activity: Vec::new(),
            service_lines: ServiceCategory::ALL.to_vec(),
        };
    }

    let service_breakdown = ServiceCategory::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            services: catalog.list(category, None).count(),
        })
        .collect();

    DashboardView {
        role,
        variant: DashboardVariant::Staff,
        financials: policy
            .can_perform(role, actions::DASHBOARD_FINANCIALS)
            .then(|| financials(catalog)),
        active_services,
        open_pqrs: desk.all().iter().filter(|p| !p.is_resolved()).count(),
        service_breakdown,
        recent_activity,
        service_lines: Vec::new(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCard<'a> {
    pub service: &'a Service,
    pub type_label: String,
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicePage<'a> {
    pub category: ServiceCategory,
    pub title: String,
    pub can_add: bool,
    pub type_options: Vec<ServiceType>,
    pub cards: Vec<ServiceCard<'a>>,
}

pub fn service_page<'a, P: AccessPolicy + ?Sized>(
    policy: &P,
    role: Role,
    catalog: &'a ServiceCatalog,
    category: ServiceCategory,
    type_filter: Option<ServiceType>,
) -> ServicePage<'a> {
    let can_delete = policy.can_delete_service(role);
    let cards = catalog
        .list(category, type_filter)
        .map(|service| ServiceCard {
            service,
            type_label: service.service_type.label(),
            can_edit: policy.can_edit_service(role, service.category),
            can_delete,
        })
        .collect();

    ServicePage {
        category,
        title: format!("{} Services", category.label()),
        can_add: policy.can_create_service(role, category),
        type_options: catalog.type_options(category),
        cards,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportPage<'a> {
    pub reports: Vec<&'a Report>,
    pub active: Option<&'a Report>,
    pub summary: Option<ReportSummary>,
    pub can_generate: bool,
    pub can_create: bool,
}

/// `requested` selects the active report when it is visible; otherwise the
/// first visible report is active.
pub fn report_page<'a, P: AccessPolicy + ?Sized>(
    policy: &P,
    role: Role,
    board: &'a ReportBoard,
    catalog: &ServiceCatalog,
    desk: &PqrDesk,
    requested: Option<&str>,
) -> ReportPage<'a> {
    let visible = board.visible(policy, role);
    let active = requested
        .and_then(|id| visible.clone().find(|r| r.id == id))
        .or_else(|| visible.clone().next());

    ReportPage {
        reports: visible.collect(),
        active,
        summary: active.map(|report| summarize(report, catalog, desk)),
        can_generate: policy.can_perform(role, actions::REPORTS_GENERATE),
        can_create: policy.can_perform(role, actions::REPORTS_CREATE),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PqrPage<'a> {
    pub is_manager: bool,
    pub can_submit: bool,
    pub items: Vec<&'a Pqr>,
}

pub fn pqr_page<'a, P: AccessPolicy + ?Sized>(
    policy: &P,
    role: Role,
    desk: &'a PqrDesk,
    filter: &PqrFilter,
) -> PqrPage<'a> {
    let is_manager = policy.can_perform(role, actions::PQRS_MANAGE);
    PqrPage {
        is_manager,
        can_submit: !is_manager,
        items: desk.filter(filter).collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingSection<'a> {
    pub category: ServiceCategory,
    pub services: Vec<&'a Service>,
}

pub fn pricing_page(catalog: &ServiceCatalog, only: Option<ServiceCategory>) -> Vec<PricingSection<'_>> {
    ServiceCategory::ALL
        .into_iter()
        .filter(|category| only.map_or(true, |c| c == *category))
        .map(|category| PricingSection {
            category,
            services: catalog.available_by_category(category),
        })
        .collect()
}
