//! Create `acl_entry` table.
//!
//! Each row grants one permission on one object to one principal (username).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AclEntry::Table)
                    .if_not_exists()
                    .col(uuid(AclEntry::Id).primary_key())
                    .col(string_len(AclEntry::ObjectType, 64).not_null())
                    .col(uuid(AclEntry::ObjectId).not_null())
                    .col(string_len(AclEntry::Principal, 64).not_null())
                    .col(string_len(AclEntry::Permission, 16).not_null())
                    .col(timestamp_with_time_zone(AclEntry::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AclEntry::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AclEntry { Table, Id, ObjectType, ObjectId, Principal, Permission, CreatedAt }
