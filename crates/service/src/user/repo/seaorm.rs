use sea_orm::{DatabaseConnection, EntityTrait, ColumnTrait, QueryFilter};

use crate::errors::ServiceError;
use crate::user::domain::User;
use crate::user::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        let res = models::user::Entity::find()
            .filter(models::user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.map(User::from))
    }

    async fn create(&self, username: &str, email: &str) -> Result<User, ServiceError> {
        let created = models::user::create(&self.db, username, email).await?;
        Ok(User::from(created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn find_by_username_after_create() -> Result<(), anyhow::Error> {
        let repo = SeaOrmUserRepository { db: get_db().await? };
        let created = repo.create("carol", "carol@example.com").await?;

        let found = repo.find_by_username("carol").await?.unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_username("nobody").await?.is_none());
        Ok(())
    }
}
