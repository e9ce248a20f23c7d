use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // PrivateMessage: inbox and unread-count lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_pm_to_status")
                    .table(PrivateMessage::Table)
                    .col(PrivateMessage::UserToId)
                    .col(PrivateMessage::Status)
                    .to_owned(),
            )
            .await?;

        // PrivateMessage: outbox and drafts
        manager
            .create_index(
                Index::create()
                    .name("idx_pm_from_status")
                    .table(PrivateMessage::Table)
                    .col(PrivateMessage::UserFromId)
                    .col(PrivateMessage::Status)
                    .to_owned(),
            )
            .await?;

        // AclEntry: composite unique (object_type, object_id, principal, permission)
        manager
            .create_index(
                Index::create()
                    .name("uniq_acl_object_principal_permission")
                    .table(AclEntry::Table)
                    .col(AclEntry::ObjectType)
                    .col(AclEntry::ObjectId)
                    .col(AclEntry::Principal)
                    .col(AclEntry::Permission)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pm_to_status").table(PrivateMessage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pm_from_status").table(PrivateMessage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_acl_object_principal_permission").table(AclEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PrivateMessage { Table, UserToId, UserFromId, Status }

#[derive(DeriveIden)]
enum AclEntry { Table, ObjectType, ObjectId, Principal, Permission }
