//! Request-scoped caller identity.
//!
//! Resolving who is calling (sessions, tokens) happens in the outer tier; the
//! services only receive the result.

use crate::user::domain::UserRef;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(UserRef),
}

impl Identity {
    pub fn anonymous() -> Self { Identity::Anonymous }

    pub fn authenticated(user: impl Into<UserRef>) -> Self { Identity::Authenticated(user.into()) }

    /// `None` for anonymous callers.
    pub fn username(&self) -> Option<&str> {
        self.user().map(|u| u.username.as_str())
    }

    pub fn user(&self) -> Option<&UserRef> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(u) => Some(u),
        }
    }

    pub fn is_anonymous(&self) -> bool { matches!(self, Identity::Anonymous) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn anonymous_has_no_username() {
        let id = Identity::default();
        assert!(id.is_anonymous());
        assert_eq!(id.username(), None);
    }

    #[test]
    fn authenticated_exposes_username() {
        let id = Identity::authenticated(UserRef { id: Uuid::new_v4(), username: "alice".into() });
        assert_eq!(id.username(), Some("alice"));
    }
}
