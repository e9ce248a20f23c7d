use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use models::banner::BannerPosition;

/// HTML snippet shown at a fixed display position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: Uuid,
    pub position: BannerPosition,
    pub content: String,
}

impl Banner {
    pub fn new(position: BannerPosition, content: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), position, content: content.into() }
    }
}

impl From<models::banner::Model> for Banner {
    fn from(m: models::banner::Model) -> Self { Banner { id: m.id, position: m.position, content: m.content } }
}
