use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::user;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PrivateMessageStatus {
    #[sea_orm(string_value = "not_read")]
    NotRead,
    #[sea_orm(string_value = "read")]
    Read,
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "private_message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub user_from_id: Uuid,
    pub user_to_id: Uuid,
    pub status: PrivateMessageStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { UserFrom, UserTo }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::UserFrom => Entity::belongs_to(user::Entity).from(Column::UserFromId).to(user::Column::Id).into(),
            Relation::UserTo => Entity::belongs_to(user::Entity).from(Column::UserToId).to(user::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
