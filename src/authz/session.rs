use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Role, User};

/// A logged-in user and the single role they act under.
///
/// The role is fixed when the session starts; there is no setter.
/// Switching roles means ending this session and starting another.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    user: User,
    started_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn start(user: User) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            user,
            started_at: Utc::now(),
        };
        tracing::info!(
            session_id = %session.id,
            user_id = %session.user.id,
            role = %session.user.role,
            "session started"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Consume the session; returns the user it belonged to.
    pub(crate) fn end(self) -> User {
        tracing::info!(session_id = %self.id, user_id = %self.user.id, "session ended");
        self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "9".into(),
            name: "Tester".into(),
            email: "tester@example.com".into(),
            role,
            avatar: None,
        }
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let a = Session::start(user(Role::ClinicAdmin));
        let b = Session::start(user(Role::ClinicAdmin));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.role(), Role::ClinicAdmin);
    }

    #[test]
    fn end_returns_the_user() {
        let session = Session::start(user(Role::Public));
        let user = session.end();
        assert_eq!(user.role, Role::Public);
    }
}
