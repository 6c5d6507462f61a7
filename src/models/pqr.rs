use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ServiceCategory;
use crate::events::{Loggable, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PqrKind {
    Complaint,
    Question,
    Suggestion,
}

impl PqrKind {
    pub const ALL: [PqrKind; 3] = [PqrKind::Complaint, PqrKind::Question, PqrKind::Suggestion];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PqrStatus {
    Pending,
    InProgress,
    Resolved,
}

impl PqrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PqrStatus::Pending => "PENDING",
            PqrStatus::InProgress => "IN_PROGRESS",
            PqrStatus::Resolved => "RESOLVED",
        }
    }

    pub fn parse(raw: &str) -> Option<PqrStatus> {
        match raw.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PENDING" => Some(PqrStatus::Pending),
            "IN_PROGRESS" => Some(PqrStatus::InProgress),
            "RESOLVED" => Some(PqrStatus::Resolved),
            _ => None,
        }
    }
}

/// A customer petition, question or request tracked to resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pqr {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: PqrKind,
    pub category: ServiceCategory,
    pub subject: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub status: PqrStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_date: Option<DateTime<Utc>>,
}

impl Pqr {
    pub fn is_resolved(&self) -> bool {
        self.status == PqrStatus::Resolved
    }
}

impl Loggable for Pqr {
    fn entity_type() -> &'static str { "pqr" }
    fn subject_id(&self) -> &str { &self.id }
    fn severity(&self) -> Severity {
        match self.kind {
            PqrKind::Complaint => Severity::Critical,
            _ => Severity::Important,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PqrSubmitRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: PqrKind,
    pub category: ServiceCategory,
    pub subject: String,
    pub message: String,
}
