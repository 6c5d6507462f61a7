use std::collections::{BTreeSet, HashMap, HashSet};

use crate::errors::{AppError, AppResult};
use crate::models::Role;

use super::{actions, routes};

/// Static resource -> roles mapping, built once at startup.
///
/// `GeneralManager` is added to every entry on construction, so the
/// superuser rule cannot be forgotten by a hand-written table.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    routes: HashMap<String, HashSet<Role>>,
    actions: HashMap<String, HashSet<Role>>,
    blanket_editors: HashSet<Role>,
    deleters: HashSet<Role>,
}

impl PermissionTable {
    pub fn builder() -> PermissionTableBuilder {
        PermissionTableBuilder::default()
    }

    /// The rules the business runs with.
    pub fn standard() -> Self {
        use Role::*;

        Self::builder()
            .route(routes::DASHBOARD, &Role::ALL)
            .route(routes::CLINIC_SERVICES, &[ClinicAdmin, HotelEmployee])
            .route(routes::HOTEL_SERVICES, &[HotelEmployee])
            .route(routes::SPA_SERVICES, &[SpaAssistant, ClinicAdmin])
            .route(routes::PRICING, &[Public])
            .route(routes::REPORTS, &[HotelEmployee, ClinicAdmin, SpaAssistant])
            .route(routes::PQRS, &Role::ALL)
            .action(actions::REPORTS_GENERATE, &[])
            .action(actions::REPORTS_CREATE, &[])
            .action(actions::PQRS_MANAGE, &[])
            .action(actions::DASHBOARD_FINANCIALS, &[])
            .blanket_editors(&[SpaAssistant])
            .assemble()
    }

    pub fn route_allows(&self, route: &str, role: Role) -> bool {
        self.routes
            .get(route)
            .map(|roles| roles.contains(&role))
            .unwrap_or(false)
    }

    pub fn action_allows(&self, action: &str, role: Role) -> bool {
        self.actions
            .get(action)
            .map(|roles| roles.contains(&role))
            .unwrap_or(false)
    }

    pub fn is_blanket_editor(&self, role: Role) -> bool {
        self.blanket_editors.contains(&role)
    }

    pub fn can_delete(&self, role: Role) -> bool {
        self.deleters.contains(&role)
    }

    /// Routes a role may open, sorted by name.
    pub fn routes_for(&self, role: Role) -> BTreeSet<&str> {
        self.routes
            .iter()
            .filter(|(_, roles)| roles.contains(&role))
            .map(|(route, _)| route.as_str())
            .collect()
    }

    pub fn known_routes(&self) -> BTreeSet<&str> {
        self.routes.keys().map(String::as_str).collect()
    }

    /// Every role must reach at least one route, otherwise a session
    /// could be opened with nowhere to land.
    pub fn validate(&self) -> AppResult<()> {
        let stranded: Vec<&str> = Role::ALL
            .iter()
            .filter(|role| self.routes_for(**role).is_empty())
            .map(|role| role.as_str())
            .collect();

        if !stranded.is_empty() {
            return Err(AppError::configuration(format!(
                "roles without any permitted route: {}",
                stranded.join(", ")
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PermissionTableBuilder {
    routes: HashMap<String, HashSet<Role>>,
    actions: HashMap<String, HashSet<Role>>,
    blanket_editors: HashSet<Role>,
}

impl PermissionTableBuilder {
    pub fn route(mut self, name: &str, roles: &[Role]) -> Self {
        self.routes
            .entry(name.to_string())
            .or_default()
            .extend(roles.iter().copied());
        self
    }

    pub fn action(mut self, name: &str, roles: &[Role]) -> Self {
        self.actions
            .entry(name.to_string())
            .or_default()
            .extend(roles.iter().copied());
        self
    }

    /// Roles that may edit services of every category.
    pub fn blanket_editors(mut self, roles: &[Role]) -> Self {
        self.blanket_editors.extend(roles.iter().copied());
        self
    }

    /// Build and validate.
    pub fn build(self) -> AppResult<PermissionTable> {
        let table = self.assemble();
        table.validate()?;
        Ok(table)
    }

    fn assemble(self) -> PermissionTable {
        let mut routes = self.routes;
        let mut actions = self.actions;
        let mut blanket_editors = self.blanket_editors;

        for roles in routes.values_mut().chain(actions.values_mut()) {
            roles.insert(Role::GeneralManager);
        }
        blanket_editors.insert(Role::GeneralManager);

        PermissionTable {
            routes,
            actions,
            blanket_editors,
            deleters: HashSet::from([Role::GeneralManager]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_valid() {
        assert!(PermissionTable::standard().validate().is_ok());
    }

    #[test]
    fn public_routes_are_the_smallest_set() {
        let table = PermissionTable::standard();
        let public = table.routes_for(Role::Public);
        assert_eq!(
            public.into_iter().collect::<Vec<_>>(),
            vec![routes::DASHBOARD, routes::PQRS, routes::PRICING]
        );

        let public_len = table.routes_for(Role::Public).len();
        for role in Role::ALL {
            assert!(table.routes_for(role).len() >= public_len, "{role}");
        }
    }

    #[test]
    fn general_manager_is_added_everywhere() {
        let table = PermissionTable::builder()
            .route("kennel", &[Role::HotelEmployee])
            .action("kennel.clean", &[])
            .assemble();

        assert!(table.route_allows("kennel", Role::GeneralManager));
        assert!(table.action_allows("kennel.clean", Role::GeneralManager));
        assert!(table.is_blanket_editor(Role::GeneralManager));
        assert!(table.can_delete(Role::GeneralManager));
        assert!(!table.can_delete(Role::HotelEmployee));
    }

    #[test]
    fn build_rejects_stranded_roles() {
        let err = PermissionTable::builder()
            .route(routes::DASHBOARD, &[Role::HotelEmployee, Role::ClinicAdmin])
            .build()
            .unwrap_err();

        assert_eq!(err.kind(), "configuration");
        let message = err.to_string();
        assert!(message.contains("SPA_ASSISTANT"));
        assert!(message.contains("PUBLIC"));
        assert!(!message.contains("GENERAL_MANAGER"));
    }

    #[test]
    fn unknown_entries_are_denied() {
        let table = PermissionTable::standard();
        assert!(!table.route_allows("admin-panel", Role::GeneralManager));
        assert!(!table.action_allows("services.export", Role::GeneralManager));
    }
}
