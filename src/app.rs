use std::sync::Arc;

use crate::authz::{AccessPolicy, PermissionTable, Resolver, Session};
use crate::catalog::ServiceCatalog;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::events::ActivityLog;
use crate::models::{
    Pqr, PqrStatus, PqrSubmitRequest, Report, Role, Service, ServiceCategory,
    ServiceCreateRequest, ServiceType, ServiceUpdateRequest, User,
};
use crate::pqrs::{PqrDesk, PqrFilter};
use crate::reports::ReportBoard;
use crate::seed::SeedData;
use crate::views::{self, DashboardView, NavItem, PqrPage, PricingSection, ReportPage, RouteDecision, ServicePage};

/// All in-memory state of one running application.
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    resolver: Resolver,
    users: Vec<User>,
    catalog: ServiceCatalog,
    desk: PqrDesk,
    reports: ReportBoard,
    activity: ActivityLog,
}

/// Build the application from configuration: standard permission table,
/// seed file when configured, built-in data otherwise.
pub fn create_app(config: AppConfig) -> AppResult<App> {
    let seed = match &config.seed_path {
        Some(path) => SeedData::from_path(path)?,
        None => SeedData::builtin()?,
    };
    App::new(config, seed, PermissionTable::standard())
}

impl App {
    pub fn new(config: AppConfig, seed: SeedData, table: PermissionTable) -> AppResult<Self> {
        table.validate()?;
        seed.validate()?;

        tracing::info!(
            users = seed.users.len(),
            services = seed.services.len(),
            pqrs = seed.pqrs.len(),
            reports = seed.reports.len(),
            "application state seeded"
        );

        Ok(Self {
            config,
            resolver: Resolver::new(Arc::new(table)),
            users: seed.users,
            catalog: ServiceCatalog::new(seed.services),
            desk: PqrDesk::new(seed.pqrs),
            reports: ReportBoard::new(seed.reports),
            activity: ActivityLog::new(),
        })
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn desk(&self) -> &PqrDesk {
        &self.desk
    }

    pub fn reports(&self) -> &ReportBoard {
        &self.reports
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    // ---- sessions -------------------------------------------------------

    pub fn login(&self, user_id: &str) -> AppResult<Session> {
        let user = self
            .users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::not_found(format!("user {user_id}")))?;
        Ok(Session::start(user.clone()))
    }

    /// Log in as the first seeded user holding `role`.
    pub fn login_as(&self, role: Role) -> AppResult<Session> {
        let user = self
            .users
            .iter()
            .find(|u| u.role == role)
            .ok_or_else(|| AppError::not_found(format!("no user with role {role}")))?;
        Ok(Session::start(user.clone()))
    }

    pub fn guest_login(&self) -> AppResult<Session> {
        self.login_as(Role::Public)
    }

    pub fn logout(&self, session: Session) -> User {
        session.end()
    }

    // ---- services -------------------------------------------------------

    pub fn create_service(
        &mut self,
        session: &Session,
        category: ServiceCategory,
        request: ServiceCreateRequest,
    ) -> AppResult<Service> {
        let role = session.role();
        let service = self
            .catalog
            .create(&self.resolver, role, category, request)?
            .clone();
        self.activity.record("created", role, &service);
        Ok(service)
    }

    pub fn update_service(
        &mut self,
        session: &Session,
        id: &str,
        request: ServiceUpdateRequest,
    ) -> AppResult<Service> {
        let role = session.role();
        let service = self.catalog.update(&self.resolver, role, id, request)?.clone();
        self.activity.record("updated", role, &service);
        Ok(service)
    }

    pub fn delete_service(&mut self, session: &Session, id: &str) -> AppResult<Service> {
        let role = session.role();
        let service = self.catalog.delete(&self.resolver, role, id)?;
        self.activity.record("deleted", role, &service);
        Ok(service)
    }

    // ---- pqrs -----------------------------------------------------------

    pub fn submit_pqr(&mut self, session: &Session, request: PqrSubmitRequest) -> AppResult<Pqr> {
        let role = session.role();
        if !self.resolver.can_access_route(role, crate::authz::routes::PQRS) {
            return Err(AppError::forbidden(format!("{role} may not submit PQRs")));
        }
        let pqr = self.desk.submit(request)?.clone();
        self.activity.record("submitted", role, &pqr);
        Ok(pqr)
    }

    pub fn set_pqr_status(&mut self, session: &Session, id: &str, status: PqrStatus) -> AppResult<Pqr> {
        let role = session.role();
        let pqr = self.desk.set_status(&self.resolver, role, id, status)?.clone();
        self.activity.record("status_changed", role, &pqr);
        Ok(pqr)
    }

    pub fn resolve_pqr(&mut self, session: &Session, id: &str, response: &str) -> AppResult<Pqr> {
        let role = session.role();
        let pqr = self.desk.resolve(&self.resolver, role, id, response)?.clone();
        self.activity.record("resolved", role, &pqr);
        Ok(pqr)
    }

    // ---- reports --------------------------------------------------------

    pub fn generate_report(&mut self, session: &Session, id: &str) -> AppResult<Report> {
        let role = session.role();
        let report = self.reports.generate(&self.resolver, role, id)?.clone();
        self.activity.record("generated", role, &report);
        Ok(report)
    }

    // ---- views ----------------------------------------------------------

    pub fn navigation(&self, session: &Session) -> Vec<NavItem> {
        views::navigation(&self.resolver, session.role())
    }

    pub fn open(&self, session: &Session, route: &str) -> RouteDecision {
        views::guard_route(&self.resolver, session.role(), route)
    }

    pub fn dashboard(&self, session: &Session) -> DashboardView<'_> {
        views::dashboard(
            &self.resolver,
            session.role(),
            &self.catalog,
            &self.desk,
            self.activity.recent(self.config.activity_limit),
        )
    }

    pub fn service_page(
        &self,
        session: &Session,
        category: ServiceCategory,
        type_filter: Option<ServiceType>,
    ) -> ServicePage<'_> {
        views::service_page(&self.resolver, session.role(), &self.catalog, category, type_filter)
    }

    pub fn report_page(&self, session: &Session, requested: Option<&str>) -> ReportPage<'_> {
        views::report_page(
            &self.resolver,
            session.role(),
            &self.reports,
            &self.catalog,
            &self.desk,
            requested,
        )
    }

    pub fn pqr_page(&self, session: &Session, filter: &PqrFilter) -> PqrPage<'_> {
        views::pqr_page(&self.resolver, session.role(), &self.desk, filter)
    }

    pub fn pricing_page(&self, only: Option<ServiceCategory>) -> Vec<PricingSection<'_>> {
        views::pricing_page(&self.catalog, only)
    }
}
