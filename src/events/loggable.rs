use serde::{Deserialize, Serialize};

/// Severity levels for activity entries.
/// Drives how prominently the dashboard feed surfaces an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Deletions and complaints
    Critical,
    /// Regular catalog and PQR changes (default)
    #[default]
    Important,
    /// Routine bookkeeping such as report regeneration
    Noise,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Important => "important",
            Severity::Noise => "noise",
        }
    }
}

/// Trait for entities that can be recorded in the activity log.
pub trait Loggable: Serialize {
    /// The entity type name (e.g., "service", "pqr", "report").
    /// This becomes the prefix in event names like "service.created"
    fn entity_type() -> &'static str;

    /// The subject id (the entity's identifier)
    fn subject_id(&self) -> &str;

    /// Severity level for entries (defaults to Important)
    fn severity(&self) -> Severity {
        Severity::Important
    }

    /// Override severity based on action (e.g., "deleted" -> Critical)
    fn severity_for_action(&self, action: &str) -> Severity {
        match action {
            "deleted" => Severity::Critical,
            "created" | "updated" => self.severity(),
            _ => Severity::Important,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Thing {
        id: String,
    }

    impl Loggable for Thing {
        fn entity_type() -> &'static str { "thing" }
        fn subject_id(&self) -> &str { &self.id }
        fn severity(&self) -> Severity { Severity::Noise }
    }

    #[test]
    fn deletions_are_always_critical() {
        let thing = Thing { id: "t1".into() };
        assert_eq!(thing.severity_for_action("deleted"), Severity::Critical);
        assert_eq!(thing.severity_for_action("created"), Severity::Noise);
        assert_eq!(thing.severity_for_action("resolved"), Severity::Important);
    }
}
