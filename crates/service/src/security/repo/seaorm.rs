use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use models::acl_entry;
use crate::errors::ServiceError;
use crate::security::domain::{AclEntry, ObjectIdentity, Permission};
use crate::security::repository::AclRepository;

pub struct SeaOrmAclRepository {
    pub db: DatabaseConnection,
}

fn object_filter(object: &ObjectIdentity) -> sea_orm::Select<acl_entry::Entity> {
    acl_entry::Entity::find()
        .filter(acl_entry::Column::ObjectType.eq(object.object_type))
        .filter(acl_entry::Column::ObjectId.eq(object.object_id))
}

#[async_trait::async_trait]
impl AclRepository for SeaOrmAclRepository {
    async fn grant(&self, entry: &AclEntry) -> Result<(), ServiceError> {
        let am = acl_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            object_type: Set(entry.object.object_type.to_string()),
            object_id: Set(entry.object.object_id),
            principal: Set(entry.principal.clone()),
            permission: Set(entry.permission),
            created_at: Set(Utc::now().into()),
        };
        // single statement so concurrent grants of one entry settle on the unique index
        let res = acl_entry::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([
                    acl_entry::Column::ObjectType,
                    acl_entry::Column::ObjectId,
                    acl_entry::Column::Principal,
                    acl_entry::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;
        match res {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(ServiceError::Db(e.to_string())),
        }
    }

    async fn has_any(&self, object: &ObjectIdentity, principal: &str, permissions: &[Permission]) -> Result<bool, ServiceError> {
        if permissions.is_empty() {
            return Ok(false);
        }
        let matches = object_filter(object)
            .filter(acl_entry::Column::Principal.eq(principal))
            .filter(acl_entry::Column::Permission.is_in(permissions.iter().copied()))
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(matches > 0)
    }

    async fn delete_for_object(&self, object: &ObjectIdentity) -> Result<u64, ServiceError> {
        let res = acl_entry::Entity::delete_many()
            .filter(acl_entry::Column::ObjectType.eq(object.object_type))
            .filter(acl_entry::Column::ObjectId.eq(object.object_id))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, get_file_db};

    #[tokio::test]
    async fn grant_check_and_delete() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAclRepository { db: get_db().await? };
        let object = ObjectIdentity::new("private_message", Uuid::new_v4());
        let entry = AclEntry { object, principal: "alice".into(), permission: Permission::Admin };

        repo.grant(&entry).await?;
        // second grant is absorbed rather than violating the unique index
        repo.grant(&entry).await?;

        assert!(repo.has_any(&object, "alice", &[Permission::Read, Permission::Admin]).await?);
        assert!(!repo.has_any(&object, "alice", &[Permission::Read]).await?);
        assert!(!repo.has_any(&object, "bob", &[Permission::Admin]).await?);

        assert_eq!(repo.delete_for_object(&object).await?, 1);
        assert!(!repo.has_any(&object, "alice", &[Permission::Admin]).await?);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_grants_of_same_entry_both_succeed() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_file_db().await?;
        let repo = SeaOrmAclRepository { db };

        for _ in 0..20 {
            let object = ObjectIdentity::new("private_message", Uuid::new_v4());
            let entry = AclEntry { object, principal: "alice".into(), permission: Permission::Read };

            let (a, b) = tokio::join!(repo.grant(&entry), repo.grant(&entry));
            a?;
            b?;

            let rows = object_filter(&object).count(&repo.db).await?;
            assert_eq!(rows, 1);
        }
        Ok(())
    }
}
