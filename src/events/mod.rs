use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Role;

pub mod loggable;
pub use loggable::{Loggable, Severity};

/// One recorded mutation, newest entries feed the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    /// `<entity>.<action>`, e.g. `service.created`
    pub name: String,
    pub description: String,
    pub actor: Role,
    pub subject_id: String,
    pub severity: Severity,
    pub occurred_at: DateTime<Utc>,
}

/// Append-only, in-memory activity log.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `action` on `entity` by `actor` and mirror it to tracing.
    pub fn record<T: Loggable>(&mut self, action: &str, actor: Role, entity: &T) -> &ActivityEntry {
        let name = format!("{}.{}", T::entity_type(), action);
        let severity = entity.severity_for_action(action);
        let description = describe(&name);

        tracing::info!(
            event = %name,
            actor = %actor,
            subject_id = %entity.subject_id(),
            severity = severity.as_str(),
            "activity recorded"
        );

        self.entries.push(ActivityEntry {
            id: Uuid::new_v4(),
            name,
            description,
            actor,
            subject_id: entity.subject_id().to_string(),
            severity,
            occurred_at: Utc::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Newest first, at most `limit` entries.
    pub fn recent(&self, limit: usize) -> Vec<&ActivityEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn describe(name: &str) -> String {
    match name {
        "service.created" => "Service created",
        "service.updated" => "Service updated",
        "service.deleted" => "Service deleted",
        "pqr.submitted" => "New PQR received",
        "pqr.status_changed" => "PQR status changed",
        "pqr.resolved" => "PQR resolved",
        "report.generated" => "Report generated",
        _ => "System event",
    }
    .to_string()
}
