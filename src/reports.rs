//! Report board: which reports a role sees and what they contain.

use serde::Serialize;

use crate::authz::{actions, visible_reports, AccessPolicy};
use crate::catalog::ServiceCatalog;
use crate::errors::{AppError, AppResult};
use crate::models::{PqrKind, Report, ReportKind, Role, ServiceCategory, ServiceType};
use crate::pqrs::PqrDesk;
use crate::utils::utc_now;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PqrBreakdownRow {
    pub category: ServiceCategory,
    pub complaints: usize,
    pub questions: usize,
    pub suggestions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceTypeCount {
    pub service_type: ServiceType,
    pub label: String,
    pub count: usize,
}

/// Live content behind a report, computed from current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum ReportSummary {
    PqrBreakdown(Vec<PqrBreakdownRow>),
    ServiceCounts(Vec<ServiceTypeCount>),
    /// No backing data is tracked for this report kind.
    Unavailable,
}

#[derive(Debug, Clone, Default)]
pub struct ReportBoard {
    reports: Vec<Report>,
}

impl ReportBoard {
    pub fn new(reports: Vec<Report>) -> Self {
        Self { reports }
    }

    pub fn all(&self) -> &[Report] {
        &self.reports
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn visible<'a, 'p, P>(
        &'a self,
        policy: &'p P,
        role: Role,
    ) -> impl Iterator<Item = &'a Report> + Clone + 'p
    where
        'a: 'p,
        P: AccessPolicy + ?Sized,
    {
        visible_reports(policy, role, &self.reports)
    }

    /// Stamp a report as freshly generated.
    pub fn generate<P: AccessPolicy + ?Sized>(
        &mut self,
        policy: &P,
        role: Role,
        id: &str,
    ) -> AppResult<&Report> {
        if !policy.can_perform(role, actions::REPORTS_GENERATE) {
            return Err(AppError::forbidden(format!("{role} may not generate reports")));
        }
        let report = self
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("report {id}")))?;
        if !policy.can_view_report(role, &*report) {
            return Err(AppError::forbidden(format!("{role} may not view report {id}")));
        }
        report.last_generated = Some(utc_now());
        tracing::debug!(report_id = %report.id, role = %role, "report generated");
        Ok(report)
    }
}

pub fn summarize(report: &Report, catalog: &ServiceCatalog, desk: &PqrDesk) -> ReportSummary {
    match report.kind {
        ReportKind::Pqr => {
            let rows = ServiceCategory::ALL
                .into_iter()
                .map(|category| {
                    let count = |kind: PqrKind| {
                        desk.all()
                            .iter()
                            .filter(|p| p.category == category && p.kind == kind)
                            .count()
                    };
                    PqrBreakdownRow {
                        category,
                        complaints: count(PqrKind::Complaint),
                        questions: count(PqrKind::Question),
                        suggestions: count(PqrKind::Suggestion),
                    }
                })
                .collect();
            ReportSummary::PqrBreakdown(rows)
        }
        ReportKind::Services => {
            let mut rows: Vec<ServiceTypeCount> = ServiceType::ALL
                .into_iter()
                .map(|service_type| ServiceTypeCount {
                    service_type,
                    label: service_type.label(),
                    count: catalog
                        .all()
                        .iter()
                        .filter(|s| s.service_type == service_type)
                        .count(),
                })
                .filter(|row| row.count > 0)
                .collect();
            // "ordered list": most offered first, stable on ties
            rows.sort_by(|a, b| b.count.cmp(&a.count));
            ReportSummary::ServiceCounts(rows)
        }
        ReportKind::Breeds | ReportKind::Profit => ReportSummary::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::authz::{AccessControlled, PermissionTable, Resolver};
    use crate::seed::SeedData;

    fn setup() -> (ReportBoard, ServiceCatalog, PqrDesk, Resolver) {
        let seed = SeedData::builtin().unwrap();
        (
            ReportBoard::new(seed.reports),
            ServiceCatalog::new(seed.services),
            PqrDesk::new(seed.pqrs),
            Resolver::new(Arc::new(PermissionTable::standard())),
        )
    }

    #[test]
    fn visibility_follows_access_roles() {
        let (board, _, _, resolver) = setup();
        let ids = |role| {
            board
                .visible(&resolver, role)
                .map(|r| r.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Role::GeneralManager), vec!["r1", "r2", "r3", "r4"]);
        assert_eq!(ids(Role::HotelEmployee), vec!["r2", "r3"]);
        assert_eq!(ids(Role::ClinicAdmin), vec!["r2"]);
        assert!(ids(Role::Public).is_empty());
    }

    /// Standard rules, but reports restricted to a single role stay hidden.
    struct SharedOnly(Resolver);

    impl AccessPolicy for SharedOnly {
        fn can_access_route(&self, role: Role, route: &str) -> bool {
            self.0.can_access_route(role, route)
        }

        fn can_perform(&self, role: Role, action: &str) -> bool {
            self.0.can_perform(role, action)
        }

        fn can_edit_service(&self, role: Role, category: ServiceCategory) -> bool {
            self.0.can_edit_service(role, category)
        }

        fn can_delete_service(&self, role: Role) -> bool {
            self.0.can_delete_service(role)
        }

        fn can_view_report(&self, role: Role, report: &dyn AccessControlled) -> bool {
            report.access_roles().len() > 1 && self.0.can_view_report(role, report)
        }
    }

    #[test]
    fn listing_and_generation_share_one_visibility_rule() {
        let (mut board, _, _, resolver) = setup();
        let policy = SharedOnly(resolver);

        // r1 and r4 are manager-only
        let ids: Vec<String> = board
            .visible(&policy, Role::GeneralManager)
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(ids, vec!["r2", "r3"]);

        let err = board.generate(&policy, Role::GeneralManager, "r1").unwrap_err();
        assert_eq!(err.kind(), "forbidden");
        assert!(board.generate(&policy, Role::GeneralManager, "r2").is_ok());
    }

    #[test]
    fn generate_is_manager_only() {
        let (mut board, _, _, resolver) = setup();
        let err = board.generate(&resolver, Role::HotelEmployee, "r2").unwrap_err();
        assert_eq!(err.kind(), "forbidden");

        let before = board.get("r2").and_then(|r| r.last_generated);
        let report = board.generate(&resolver, Role::GeneralManager, "r2").unwrap();
        assert!(report.last_generated > before);

        let err = board.generate(&resolver, Role::GeneralManager, "r9").unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn pqr_summary_counts_by_category_and_kind() {
        let (board, catalog, desk, _) = setup();
        let summary = summarize(board.get("r1").unwrap(), &catalog, &desk);
        match summary {
            ReportSummary::PqrBreakdown(rows) => {
                let hotel = rows.iter().find(|r| r.category == ServiceCategory::Hotel).unwrap();
                assert_eq!(hotel.complaints, 1);
                let spa = rows.iter().find(|r| r.category == ServiceCategory::Spa).unwrap();
                assert_eq!(spa.suggestions, 1);
                assert_eq!(rows.len(), 3);
            }
            other => panic!("unexpected summary {other:?}"),
        }
    }

    #[test]
    fn services_summary_orders_by_count() {
        let (board, catalog, desk, _) = setup();
        match summarize(board.get("r2").unwrap(), &catalog, &desk) {
            ReportSummary::ServiceCounts(rows) => {
                assert_eq!(rows[0].service_type, ServiceType::Grooming);
                assert_eq!(rows[0].count, 2);
                assert_eq!(rows.len(), 9);
            }
            other => panic!("unexpected summary {other:?}"),
        }
        assert_eq!(
            summarize(board.get("r4").unwrap(), &catalog, &desk),
            ReportSummary::Unavailable
        );
    }
}
