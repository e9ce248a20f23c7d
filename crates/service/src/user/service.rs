use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::User;
use super::repository::UserRepository;
use crate::errors::ServiceError;

/// User lookup gateway consumed by the messaging service.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Resolve a user by username.
    ///
    /// # Examples
    /// ```
    /// use service::user::{UserService, repository::{UserRepository, mock::MockUserRepository}};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockUserRepository::default());
    /// tokio_test::block_on(repo.create("alice", "alice@example.com")).unwrap();
    /// let svc = UserService::new(repo);
    /// let user = tokio_test::block_on(svc.get_by_username("alice")).unwrap();
    /// assert_eq!(user.email, "alice@example.com");
    /// assert!(tokio_test::block_on(svc.get_by_username("bob")).is_err());
    /// ```
    pub async fn get_by_username(&self, username: &str) -> Result<User, ServiceError> {
        match self.repo.find_by_username(username).await? {
            Some(user) => Ok(user),
            None => {
                debug!(%username, "user_lookup_miss");
                Err(ServiceError::not_found("user"))
            }
        }
    }

    #[instrument(skip(self, email), fields(username = %username))]
    pub async fn register(&self, username: &str, email: &str) -> Result<User, ServiceError> {
        let user = self.repo.create(username, email).await?;
        info!(user_id = %user.id, "user_registered");
        Ok(user)
    }
}
