use std::sync::Arc;

use crate::models::{Role, ServiceCategory};

use super::{routes, PermissionTable};

/// Anything carrying its own list of roles allowed to see it.
pub trait AccessControlled {
    fn access_roles(&self) -> &[Role];
}

/// Policy trait for pluggable authorization logic.
///
/// All checks are pure functions of their arguments: same inputs, same answer.
pub trait AccessPolicy: Send + Sync {
    /// Whether `role` may open `route`. Unknown routes are denied.
    fn can_access_route(&self, role: Role, route: &str) -> bool;

    /// Whether `role` may perform the named action. Unknown actions are denied.
    fn can_perform(&self, role: Role, action: &str) -> bool;

    fn can_edit_service(&self, role: Role, category: ServiceCategory) -> bool;

    fn can_delete_service(&self, role: Role) -> bool;

    /// Creating shares the edit rule; the two are not distinguished.
    fn can_create_service(&self, role: Role, category: ServiceCategory) -> bool {
        self.can_edit_service(role, category)
    }

    fn can_view_report(&self, role: Role, report: &dyn AccessControlled) -> bool {
        report.access_roles().contains(&role)
    }

    fn default_landing_route(&self, _role: Role) -> &'static str {
        routes::DASHBOARD
    }
}

/// Items of `reports` that `policy` lets `role` see, in input order.
///
/// The iterator is lazy and can be cloned to restart it; nothing is
/// cached between calls.
pub fn visible_reports<'a, 'p, P, R>(
    policy: &'p P,
    role: Role,
    reports: &'a [R],
) -> impl Iterator<Item = &'a R> + Clone + 'p
where
    'a: 'p,
    P: AccessPolicy + ?Sized,
    R: AccessControlled,
{
    reports
        .iter()
        .filter(move |report| policy.can_view_report(role, *report))
}

/// Default resolver backed by a shared, immutable [`PermissionTable`].
///
/// Decision order for service edits:
/// 1. blanket editors (GeneralManager, SpaAssistant) -> allow
/// 2. the category's own admin role -> allow
/// 3. deny
#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<PermissionTable>,
}

impl Resolver {
    pub fn new(table: Arc<PermissionTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Reports visible to `role`, in input order.
    pub fn visible_reports<'a, 'p, R>(
        &'p self,
        role: Role,
        reports: &'a [R],
    ) -> impl Iterator<Item = &'a R> + Clone + 'p
    where
        'a: 'p,
        R: AccessControlled,
    {
        visible_reports(self, role, reports)
    }

    /// String-level route check for callers holding raw identifiers.
    pub fn check_route(&self, role: &str, route: &str) -> bool {
        match Role::parse(role) {
            Some(role) => self.can_access_route(role, route),
            None => {
                tracing::debug!(role = %role, route = %route, "unknown role denied");
                false
            }
        }
    }

    pub fn check_action(&self, role: &str, action: &str) -> bool {
        match Role::parse(role) {
            Some(role) => self.can_perform(role, action),
            None => {
                tracing::debug!(role = %role, action = %action, "unknown role denied");
                false
            }
        }
    }
}

impl AccessPolicy for Resolver {
    fn can_access_route(&self, role: Role, route: &str) -> bool {
        let allowed = self.table.route_allows(route, role);
        tracing::debug!(role = %role, route = %route, allowed, "route check");
        allowed
    }

    fn can_perform(&self, role: Role, action: &str) -> bool {
        let allowed = self.table.action_allows(action, role);
        tracing::debug!(role = %role, action = %action, allowed, "action check");
        allowed
    }

    fn can_edit_service(&self, role: Role, category: ServiceCategory) -> bool {
        let allowed =
            self.table.is_blanket_editor(role) || category.admin_role() == Some(role);
        tracing::debug!(role = %role, category = %category, allowed, "service edit check");
        allowed
    }

    fn can_delete_service(&self, role: Role) -> bool {
        self.table.can_delete(role)
    }
}
