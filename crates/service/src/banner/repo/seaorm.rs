use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use models::banner;
use crate::banner::domain::{Banner, BannerPosition};
use crate::banner::repository::BannerRepository;
use crate::errors::ServiceError;

pub struct SeaOrmBannerRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl BannerRepository for SeaOrmBannerRepository {
    async fn save_or_update(&self, b: &Banner) -> Result<(), ServiceError> {
        let found = banner::Entity::find_by_id(b.id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        match found {
            Some(existing) => {
                let mut am: banner::ActiveModel = existing.into();
                am.position = Set(b.position);
                am.content = Set(b.content.clone());
                am.updated_at = Set(Utc::now().into());
                am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
            }
            None => {
                let am = banner::ActiveModel {
                    id: Set(b.id),
                    position: Set(b.position),
                    content: Set(b.content.clone()),
                    updated_at: Set(Utc::now().into()),
                };
                // a concurrent upload may have claimed the position since the lookup
                banner::Entity::insert(am)
                    .on_conflict(
                        OnConflict::column(banner::Column::Position)
                            .update_columns([banner::Column::Content, banner::Column::UpdatedAt])
                            .to_owned(),
                    )
                    .exec_without_returning(&self.db)
                    .await
                    .map_err(|e| ServiceError::Db(e.to_string()))?;
            }
        }
        Ok(())
    }

    async fn get_by_position(&self, position: BannerPosition) -> Result<Option<Banner>, ServiceError> {
        let res = banner::Entity::find()
            .filter(banner::Column::Position.eq(position))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.map(Banner::from))
    }

    async fn get_all(&self) -> Result<Vec<Banner>, ServiceError> {
        let rows = banner::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Banner::from).collect())
    }
}
