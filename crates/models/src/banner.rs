use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

/// Display slot of a banner. The string value doubles as the canonical key
/// used by the banner service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BannerPosition {
    #[sea_orm(string_value = "TOP")]
    Top,
    #[sea_orm(string_value = "BOTTOM")]
    Bottom,
}

impl BannerPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            BannerPosition::Top => "TOP",
            BannerPosition::Bottom => "BOTTOM",
        }
    }
}

impl std::fmt::Display for BannerPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BannerPosition {
    type Err = crate::errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TOP" => Ok(BannerPosition::Top),
            "BOTTOM" => Ok(BannerPosition::Bottom),
            other => Err(crate::errors::ModelError::Validation(format!("unknown banner position: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banner")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub position: BannerPosition,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}
