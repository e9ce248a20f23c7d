use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use models::private_message::PrivateMessageStatus;

use crate::security::{ObjectIdentity, Securable};
use crate::user::domain::UserRef;

/// Longest title accepted by the `private_message.title` column.
pub const MAX_TITLE_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessage {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub sender: UserRef,
    pub recipient: UserRef,
    pub status: PrivateMessageStatus,
    pub created_at: DateTime<Utc>,
}

impl PrivateMessage {
    pub const OBJECT_TYPE: &'static str = "private_message";

    /// New unread message with a fresh id.
    pub fn new(title: impl Into<String>, body: impl Into<String>, sender: UserRef, recipient: UserRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            sender,
            recipient,
            status: PrivateMessageStatus::NotRead,
            created_at: Utc::now(),
        }
    }

    pub fn object_identity_for(id: Uuid) -> ObjectIdentity {
        ObjectIdentity::new(Self::OBJECT_TYPE, id)
    }

    pub fn mark_as_read(&mut self) { self.status = PrivateMessageStatus::Read; }

    pub fn mark_as_draft(&mut self) { self.status = PrivateMessageStatus::Draft; }

    pub fn is_read(&self) -> bool { self.status == PrivateMessageStatus::Read }

    pub fn is_draft(&self) -> bool { self.status == PrivateMessageStatus::Draft }
}

impl Securable for PrivateMessage {
    fn object_identity(&self) -> ObjectIdentity { Self::object_identity_for(self.id) }
}
