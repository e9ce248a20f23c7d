//! Wiring of the SeaORM-backed services around one database connection.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use configs::CacheConfig;
use crate::banner::{BannerService, repo::seaorm::SeaOrmBannerRepository};
use crate::cache::MokaCounterCache;
use crate::private_message::{PrivateMessageService, repo::seaorm::SeaOrmPrivateMessageRepository};
use crate::security::{SecurityService, repo::seaorm::SeaOrmAclRepository};
use crate::user::{UserService, repo::seaorm::SeaOrmUserRepository};

pub type SeaOrmPrivateMessageService =
    PrivateMessageService<SeaOrmPrivateMessageRepository, SeaOrmUserRepository, SeaOrmAclRepository, MokaCounterCache>;

#[derive(Clone)]
pub struct ServiceContainer {
    pub users: Arc<UserService<SeaOrmUserRepository>>,
    pub security: Arc<SecurityService<SeaOrmAclRepository>>,
    pub banners: Arc<BannerService<SeaOrmBannerRepository>>,
    pub private_messages: Arc<SeaOrmPrivateMessageService>,
    pub unread_cache: Arc<MokaCounterCache>,
}

impl ServiceContainer {
    pub fn from_db(db: DatabaseConnection, cache: &CacheConfig) -> Self {
        let users = Arc::new(UserService::new(Arc::new(SeaOrmUserRepository { db: db.clone() })));
        let security = Arc::new(SecurityService::new(Arc::new(SeaOrmAclRepository { db: db.clone() })));
        let banners = Arc::new(BannerService::new(Arc::new(SeaOrmBannerRepository { db: db.clone() })));
        let unread_cache = Arc::new(MokaCounterCache::from_config(cache));
        let private_messages = Arc::new(PrivateMessageService::new(
            Arc::new(SeaOrmPrivateMessageRepository { db }),
            Arc::clone(&users),
            Arc::clone(&security),
            Arc::clone(&unread_cache),
        ));
        info!(unread_capacity = cache.unread_capacity, unread_ttl_secs = cache.unread_ttl_secs, "services_initialized");
        Self { users, security, banners, private_messages, unread_cache }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::BannerPosition;
    use crate::cache::CounterCache;
    use crate::errors::ServiceError;
    use crate::identity::Identity;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn messaging_flow_against_database() -> Result<(), anyhow::Error> {
        let svc = ServiceContainer::from_db(get_db().await?, &CacheConfig::default());
        let alice = Identity::authenticated(&svc.users.register("alice", "alice@example.com").await?);
        let bob = Identity::authenticated(&svc.users.register("bob", "bob@example.com").await?);

        assert_eq!(svc.private_messages.current_user_new_pm_count(&bob).await?, 0);
        assert_eq!(svc.unread_cache.get("bob").await, Some(0));

        let draft = svc.private_messages.save_draft(&alice, None, "hi", "draft body", "bob").await?;
        assert_eq!(svc.private_messages.current_user_new_pm_count(&bob).await?, 0);
        assert!(matches!(svc.private_messages.get(&bob, draft.id).await, Err(ServiceError::Forbidden(_))));

        let sent = svc.private_messages.send_draft(&alice, draft.id, "hi", "final body", "bob").await?;
        assert_eq!(svc.private_messages.current_user_new_pm_count(&bob).await?, 1);

        let mut fetched = svc.private_messages.get(&bob, sent.id).await?;
        assert_eq!(fetched.body, "final body");
        svc.private_messages.mark_as_read(&mut fetched).await?;
        assert_eq!(svc.private_messages.current_user_new_pm_count(&bob).await?, 0);

        svc.unread_cache.invalidate("bob").await;
        assert_eq!(svc.private_messages.current_user_new_pm_count(&bob).await?, 0);

        assert_eq!(svc.private_messages.get_inbox_for_current_user(&bob).await?.len(), 1);
        assert_eq!(svc.private_messages.get_outbox_for_current_user(&alice).await?.len(), 1);
        assert!(svc.private_messages.get_drafts_from_current_user(&alice).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn banners_against_database() -> Result<(), anyhow::Error> {
        let svc = ServiceContainer::from_db(get_db().await?, &CacheConfig::default());
        svc.banners.upload_banner("<div>top</div>", BannerPosition::Top).await?;
        svc.banners.upload_banner("<div>top v2</div>", BannerPosition::Top).await?;

        let all = svc.banners.get_all_banners().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all["TOP"].content, "<div>top v2</div>");
        Ok(())
    }
}
