//! Create `banner` table.
//!
//! One row per display position; the unique key on `position` backs the
//! upsert-by-position behaviour of the banner service.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Banner::Table)
                    .if_not_exists()
                    .col(uuid(Banner::Id).primary_key())
                    .col(string_len(Banner::Position, 16).unique_key().not_null())
                    .col(text(Banner::Content).not_null())
                    .col(timestamp_with_time_zone(Banner::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Banner::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Banner { Table, Id, Position, Content, UpdatedAt }
