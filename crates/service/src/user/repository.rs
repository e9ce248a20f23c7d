use async_trait::async_trait;

use super::domain::User;
use crate::errors::ServiceError;

/// Repository abstraction for user lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError>;
    async fn create(&self, username: &str, email: &str) -> Result<User, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<HashMap<String, User>>, // key: username
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).cloned())
        }

        async fn create(&self, username: &str, email: &str) -> Result<User, ServiceError> {
            models::user::validate_username(username)?;
            let mut users = self.users.lock().unwrap();
            if users.contains_key(username) {
                return Err(ServiceError::Validation(format!("username {username} already taken")));
            }
            let user = User { id: Uuid::new_v4(), username: username.to_string(), email: email.to_string() };
            users.insert(username.to_string(), user.clone());
            Ok(user)
        }
    }
}
