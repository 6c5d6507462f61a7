use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;
use crate::authz::AccessControlled;
use crate::events::{Loggable, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    Pqr,
    Services,
    Breeds,
    Profit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportFrequency {
    Weekly,
    Biweekly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub frequency: ReportFrequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated: Option<DateTime<Utc>>,
    pub access_roles: Vec<Role>,
}

impl AccessControlled for Report {
    fn access_roles(&self) -> &[Role] {
        &self.access_roles
    }
}

impl Loggable for Report {
    fn entity_type() -> &'static str { "report" }
    fn subject_id(&self) -> &str { &self.id }
    fn severity(&self) -> Severity { Severity::Noise }
}
