//! Create `private_message` table with FKs to `user` for both parties.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PrivateMessage::Table)
                    .if_not_exists()
                    .col(uuid(PrivateMessage::Id).primary_key())
                    .col(string_len(PrivateMessage::Title, 255).not_null())
                    .col(text(PrivateMessage::Body).not_null())
                    .col(uuid(PrivateMessage::UserFromId).not_null())
                    .col(uuid(PrivateMessage::UserToId).not_null())
                    .col(string_len(PrivateMessage::Status, 16).not_null())
                    .col(timestamp_with_time_zone(PrivateMessage::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pm_user_from")
                            .from(PrivateMessage::Table, PrivateMessage::UserFromId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pm_user_to")
                            .from(PrivateMessage::Table, PrivateMessage::UserToId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PrivateMessage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PrivateMessage { Table, Id, Title, Body, UserFromId, UserToId, Status, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
