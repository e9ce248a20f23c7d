use async_trait::async_trait;
use uuid::Uuid;

use super::domain::PrivateMessage;
use crate::errors::ServiceError;

/// Repository abstraction for private message persistence.
///
/// Folder queries return newest first. Inbox and outbox hold sent messages
/// (`NotRead`/`Read`); drafts are only visible through `get_drafts_from_user`.
#[async_trait]
pub trait PrivateMessageRepository: Send + Sync {
    async fn save_or_update(&self, pm: &PrivateMessage) -> Result<(), ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<PrivateMessage>, ServiceError>;
    async fn get_all_for_user(&self, user_id: Uuid) -> Result<Vec<PrivateMessage>, ServiceError>;
    async fn get_all_from_user(&self, user_id: Uuid) -> Result<Vec<PrivateMessage>, ServiceError>;
    async fn get_drafts_from_user(&self, user_id: Uuid) -> Result<Vec<PrivateMessage>, ServiceError>;
    /// Authoritative number of `NotRead` messages addressed to `username`.
    async fn get_new_messages_count_for(&self, username: &str) -> Result<i64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::private_message::domain::PrivateMessageStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPrivateMessageRepository {
        messages: Mutex<Vec<PrivateMessage>>,
        count_queries: AtomicUsize,
    }

    impl MockPrivateMessageRepository {
        pub fn all(&self) -> Vec<PrivateMessage> {
            self.messages.lock().unwrap().clone()
        }

        /// How many times the count query has run.
        pub fn count_queries(&self) -> usize {
            self.count_queries.load(Ordering::SeqCst)
        }

        fn select(&self, pred: impl Fn(&PrivateMessage) -> bool) -> Vec<PrivateMessage> {
            let messages = self.messages.lock().unwrap();
            let mut found: Vec<_> = messages.iter().filter(|m| pred(m)).cloned().collect();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            found
        }
    }

    fn is_sent(pm: &PrivateMessage) -> bool {
        matches!(pm.status, PrivateMessageStatus::NotRead | PrivateMessageStatus::Read)
    }

    #[async_trait]
    impl PrivateMessageRepository for MockPrivateMessageRepository {
        async fn save_or_update(&self, pm: &PrivateMessage) -> Result<(), ServiceError> {
            let mut messages = self.messages.lock().unwrap();
            match messages.iter_mut().find(|m| m.id == pm.id) {
                Some(existing) => *existing = pm.clone(),
                None => messages.push(pm.clone()),
            }
            Ok(())
        }

        async fn get(&self, id: Uuid) -> Result<Option<PrivateMessage>, ServiceError> {
            let messages = self.messages.lock().unwrap();
            Ok(messages.iter().find(|m| m.id == id).cloned())
        }

        async fn get_all_for_user(&self, user_id: Uuid) -> Result<Vec<PrivateMessage>, ServiceError> {
            Ok(self.select(|m| m.recipient.id == user_id && is_sent(m)))
        }

        async fn get_all_from_user(&self, user_id: Uuid) -> Result<Vec<PrivateMessage>, ServiceError> {
            Ok(self.select(|m| m.sender.id == user_id && is_sent(m)))
        }

        async fn get_drafts_from_user(&self, user_id: Uuid) -> Result<Vec<PrivateMessage>, ServiceError> {
            Ok(self.select(|m| m.sender.id == user_id && m.is_draft()))
        }

        async fn get_new_messages_count_for(&self, username: &str) -> Result<i64, ServiceError> {
            self.count_queries.fetch_add(1, Ordering::SeqCst);
            let messages = self.messages.lock().unwrap();
            Ok(messages
                .iter()
                .filter(|m| m.recipient.username == username && m.status == PrivateMessageStatus::NotRead)
                .count() as i64)
        }
    }
}
