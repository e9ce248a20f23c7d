use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use models::{private_message, user};
use crate::errors::ServiceError;
use crate::private_message::domain::{PrivateMessage, PrivateMessageStatus};
use crate::private_message::repository::PrivateMessageRepository;
use crate::user::domain::UserRef;

pub struct SeaOrmPrivateMessageRepository {
    pub db: DatabaseConnection,
}

const SENT: [PrivateMessageStatus; 2] = [PrivateMessageStatus::NotRead, PrivateMessageStatus::Read];

impl SeaOrmPrivateMessageRepository {
    /// Attach sender/recipient usernames to raw rows.
    async fn hydrate(&self, rows: Vec<private_message::Model>) -> Result<Vec<PrivateMessage>, ServiceError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let mut ids: Vec<Uuid> = rows.iter().flat_map(|r| [r.user_from_id, r.user_to_id]).collect();
        ids.sort();
        ids.dedup();
        let users: HashMap<Uuid, UserRef> = user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .into_iter()
            .map(|u| (u.id, UserRef { id: u.id, username: u.username }))
            .collect();

        rows.into_iter()
            .map(|r| {
                let sender = users.get(&r.user_from_id).cloned().ok_or_else(|| ServiceError::not_found("sender"))?;
                let recipient = users.get(&r.user_to_id).cloned().ok_or_else(|| ServiceError::not_found("recipient"))?;
                Ok(PrivateMessage {
                    id: r.id,
                    title: r.title,
                    body: r.body,
                    sender,
                    recipient,
                    status: r.status,
                    created_at: r.created_at.with_timezone(&Utc),
                })
            })
            .collect()
    }

    async fn find_where(&self, cond: Condition) -> Result<Vec<PrivateMessage>, ServiceError> {
        let rows = private_message::Entity::find()
            .filter(cond)
            .order_by_desc(private_message::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        self.hydrate(rows).await
    }
}

#[async_trait::async_trait]
impl PrivateMessageRepository for SeaOrmPrivateMessageRepository {
    async fn save_or_update(&self, pm: &PrivateMessage) -> Result<(), ServiceError> {
        let found = private_message::Entity::find_by_id(pm.id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        match found {
            Some(existing) => {
                let mut am: private_message::ActiveModel = existing.into();
                am.title = Set(pm.title.clone());
                am.body = Set(pm.body.clone());
                am.user_from_id = Set(pm.sender.id);
                am.user_to_id = Set(pm.recipient.id);
                am.status = Set(pm.status);
                am.created_at = Set(pm.created_at.into());
                am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
            }
            None => {
                let am = private_message::ActiveModel {
                    id: Set(pm.id),
                    title: Set(pm.title.clone()),
                    body: Set(pm.body.clone()),
                    user_from_id: Set(pm.sender.id),
                    user_to_id: Set(pm.recipient.id),
                    status: Set(pm.status),
                    created_at: Set(pm.created_at.into()),
                };
                am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
            }
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<PrivateMessage>, ServiceError> {
        let row = private_message::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        match row {
            Some(r) => Ok(self.hydrate(vec![r]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn get_all_for_user(&self, user_id: Uuid) -> Result<Vec<PrivateMessage>, ServiceError> {
        self.find_where(
            Condition::all()
                .add(private_message::Column::UserToId.eq(user_id))
                .add(private_message::Column::Status.is_in(SENT)),
        )
        .await
    }

    async fn get_all_from_user(&self, user_id: Uuid) -> Result<Vec<PrivateMessage>, ServiceError> {
        self.find_where(
            Condition::all()
                .add(private_message::Column::UserFromId.eq(user_id))
                .add(private_message::Column::Status.is_in(SENT)),
        )
        .await
    }

    async fn get_drafts_from_user(&self, user_id: Uuid) -> Result<Vec<PrivateMessage>, ServiceError> {
        self.find_where(
            Condition::all()
                .add(private_message::Column::UserFromId.eq(user_id))
                .add(private_message::Column::Status.eq(PrivateMessageStatus::Draft)),
        )
        .await
    }

    async fn get_new_messages_count_for(&self, username: &str) -> Result<i64, ServiceError> {
        let count = private_message::Entity::find()
            .join(JoinType::InnerJoin, private_message::Relation::UserTo.def())
            .filter(user::Column::Username.eq(username))
            .filter(private_message::Column::Status.eq(PrivateMessageStatus::NotRead))
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(count as i64)
    }
}
