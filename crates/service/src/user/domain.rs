use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Forum member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// Reference to a user embedded in other aggregates (message parties, identities)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Uuid,
    pub username: String,
}

impl From<&User> for UserRef {
    fn from(u: &User) -> Self { UserRef { id: u.id, username: u.username.clone() } }
}

impl From<User> for UserRef {
    fn from(u: User) -> Self { UserRef { id: u.id, username: u.username } }
}

impl From<models::user::Model> for User {
    fn from(m: models::user::Model) -> Self { User { id: m.id, username: m.username, email: m.email } }
}
