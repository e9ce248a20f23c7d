use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{PrivateMessage, PrivateMessageStatus, MAX_TITLE_LEN};
use super::repository::PrivateMessageRepository;
use crate::cache::{CounterCache, UnreadCountCache};
use crate::errors::ServiceError;
use crate::identity::Identity;
use crate::security::repository::AclRepository;
use crate::security::{Permission, SecurityService};
use crate::user::domain::UserRef;
use crate::user::repository::UserRepository;
use crate::user::UserService;

/// Private messaging application service.
///
/// Every operation receives the caller's [`Identity`]. Unread counters are
/// bumped only for users whose count is already cached; see
/// [`UnreadCountCache`] for the consistency contract.
pub struct PrivateMessageService<P, U, A, C>
where
    P: PrivateMessageRepository,
    U: UserRepository,
    A: AclRepository,
    C: CounterCache,
{
    repo: Arc<P>,
    users: Arc<UserService<U>>,
    security: Arc<SecurityService<A>>,
    unread: UnreadCountCache<C>,
}

impl<P, U, A, C> PrivateMessageService<P, U, A, C>
where
    P: PrivateMessageRepository,
    U: UserRepository,
    A: AclRepository,
    C: CounterCache,
{
    pub fn new(repo: Arc<P>, users: Arc<UserService<U>>, security: Arc<SecurityService<A>>, cache: Arc<C>) -> Self {
        Self { repo, users, security, unread: UnreadCountCache::new(cache) }
    }

    pub async fn get_inbox_for_current_user(&self, identity: &Identity) -> Result<Vec<PrivateMessage>, ServiceError> {
        let user = self.security.require_authenticated(identity)?;
        self.repo.get_all_for_user(user.id).await
    }

    pub async fn get_outbox_for_current_user(&self, identity: &Identity) -> Result<Vec<PrivateMessage>, ServiceError> {
        let user = self.security.require_authenticated(identity)?;
        self.repo.get_all_from_user(user.id).await
    }

    pub async fn get_drafts_from_current_user(&self, identity: &Identity) -> Result<Vec<PrivateMessage>, ServiceError> {
        let user = self.security.require_authenticated(identity)?;
        self.repo.get_drafts_from_user(user.id).await
    }

    /// Send a new message to `recipient_username`.
    ///
    /// Nothing is stored and no counter moves when the recipient is unknown.
    #[instrument(skip(self, identity, title, body), fields(recipient = %recipient_username))]
    pub async fn send_message(&self, identity: &Identity, title: &str, body: &str, recipient_username: &str) -> Result<PrivateMessage, ServiceError> {
        let sender = self.security.require_authenticated(identity)?;
        let pm = self.populate_message(title, body, sender, recipient_username).await?;
        self.repo.save_or_update(&pm).await?;
        self.unread.increment_for(&pm.recipient.username).await;

        self.security.grant_read_permission_to_current_user(identity, &pm).await?;
        self.security.grant_read_permission_to_user(&pm, &pm.recipient.username).await?;

        info!(message_id = %pm.id, sender = %pm.sender.username, "private_message_sent");
        Ok(pm)
    }

    /// Mark `pm` as read by its recipient and lower the recipient's cached count.
    #[instrument(skip(self, pm), fields(message_id = %pm.id))]
    pub async fn mark_as_read(&self, pm: &mut PrivateMessage) -> Result<(), ServiceError> {
        pm.mark_as_read();
        self.repo.save_or_update(pm).await?;
        self.unread.decrement_for(&pm.recipient.username).await;
        debug!(recipient = %pm.recipient.username, "private_message_read");
        Ok(())
    }

    /// Create or update a draft. `id = None` starts a new draft.
    ///
    /// Overwriting a stored message requires admin permission on it. Drafts
    /// are not delivered, so the unread counter is untouched.
    #[instrument(skip(self, identity, title, body), fields(recipient = %recipient_username))]
    pub async fn save_draft(&self, identity: &Identity, id: Option<Uuid>, title: &str, body: &str, recipient_username: &str) -> Result<PrivateMessage, ServiceError> {
        let sender = self.security.require_authenticated(identity)?;
        if let Some(id) = id {
            if self.repo.get(id).await?.is_some() {
                self.security.require_any(identity, &PrivateMessage::object_identity_for(id), &[Permission::Admin]).await?;
            }
        }
        let mut pm = self.populate_message(title, body, sender, recipient_username).await?;
        if let Some(id) = id {
            pm.id = id;
        }
        pm.mark_as_draft();
        self.repo.save_or_update(&pm).await?;

        self.security.grant_admin_permission_to_current_user(identity, &pm).await?;

        info!(message_id = %pm.id, "private_message_draft_saved");
        Ok(pm)
    }

    /// Turn draft `id` into a delivered message.
    ///
    /// The ACL is rebuilt: the drafting sender's admin grant is dropped and
    /// read permission goes to sender and recipient.
    #[instrument(skip(self, identity, title, body), fields(message_id = %id, recipient = %recipient_username))]
    pub async fn send_draft(&self, identity: &Identity, id: Uuid, title: &str, body: &str, recipient_username: &str) -> Result<PrivateMessage, ServiceError> {
        self.security.require_any(identity, &PrivateMessage::object_identity_for(id), &[Permission::Admin]).await?;
        let sender = self.security.require_authenticated(identity)?;
        let mut pm = self.populate_message(title, body, sender, recipient_username).await?;
        pm.id = id;
        pm.status = PrivateMessageStatus::NotRead;
        self.repo.save_or_update(&pm).await?;
        self.unread.increment_for(&pm.recipient.username).await;

        self.security.delete_from_acl(&pm).await?;
        self.security.grant_read_permission_to_current_user(identity, &pm).await?;
        self.security.grant_read_permission_to_user(&pm, &pm.recipient.username).await?;

        info!(message_id = %pm.id, sender = %pm.sender.username, "private_message_draft_sent");
        Ok(pm)
    }

    /// Fetch a message the caller may administer or read.
    pub async fn get(&self, identity: &Identity, id: Uuid) -> Result<PrivateMessage, ServiceError> {
        self.security
            .require_any(identity, &PrivateMessage::object_identity_for(id), &[Permission::Admin, Permission::Read])
            .await?;
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("private message"))
    }

    /// Unread message count for the caller; `0` for anonymous callers.
    pub async fn current_user_new_pm_count(&self, identity: &Identity) -> Result<i64, ServiceError> {
        let repo = &self.repo;
        self.unread
            .current_user_new_pm_count(identity, |username| async move { repo.get_new_messages_count_for(&username).await })
            .await
    }

    async fn populate_message(&self, title: &str, body: &str, sender: &UserRef, recipient_username: &str) -> Result<PrivateMessage, ServiceError> {
        validate_title(title)?;
        let recipient = self.users.get_by_username(recipient_username).await?;
        Ok(PrivateMessage::new(title, body, sender.clone(), UserRef::from(recipient)))
    }
}

fn validate_title(title: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::Validation("title required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ServiceError::Validation(format!("title too long (<={MAX_TITLE_LEN})")));
    }
    Ok(())
}
