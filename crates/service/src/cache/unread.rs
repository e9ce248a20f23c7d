//! Per-user unread private message counter.
//!
//! Read-through cache in front of the authoritative count query. Once an
//! entry is populated it is returned verbatim until it is bumped by
//! [`UnreadCountCache::increment_for`] / [`UnreadCountCache::decrement_for`]
//! or dropped by the backing cache's own expiry/eviction policy.
//!
//! The counter is advisory (a "new messages" badge), not a ledger:
//! - a bump is a plain read-modify-write, so two concurrent bumps for the same
//!   user can lose one of them (last writer wins);
//! - bumps on an absent entry do nothing; the next read recomputes from the store;
//! - there is no floor, a decrement may take the value below zero;
//! - writes that bypass this type are never reflected until the entry expires.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use super::CounterCache;
use crate::errors::ServiceError;
use crate::identity::Identity;

pub struct UnreadCountCache<C: CounterCache> {
    cache: Arc<C>,
}

impl<C: CounterCache> Clone for UnreadCountCache<C> {
    fn clone(&self) -> Self { Self { cache: Arc::clone(&self.cache) } }
}

impl<C: CounterCache> UnreadCountCache<C> {
    pub fn new(cache: Arc<C>) -> Self { Self { cache } }

    /// Unread count for the caller.
    ///
    /// Anonymous callers get `0` and the cache is not touched. Otherwise a
    /// cached value wins; on a miss `load` runs once with the username and its
    /// result is stored.
    pub async fn current_user_new_pm_count<F, Fut>(&self, identity: &Identity, load: F) -> Result<i64, ServiceError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<i64, ServiceError>>,
    {
        let Some(username) = identity.username() else {
            return Ok(0);
        };
        if let Some(count) = self.cache.get(username).await {
            debug!(%username, count, "unread_count_cache_hit");
            return Ok(count);
        }
        let count = load(username.to_string()).await?;
        self.cache.put(username, count).await;
        debug!(%username, count, "unread_count_cache_populated");
        Ok(count)
    }

    /// Add one to a populated entry; absent entries stay absent.
    pub async fn increment_for(&self, username: &str) {
        self.bump(username, 1).await;
    }

    /// Subtract one from a populated entry; absent entries stay absent.
    pub async fn decrement_for(&self, username: &str) {
        self.bump(username, -1).await;
    }

    pub async fn is_populated(&self, username: &str) -> bool {
        self.cache.contains_key(username).await
    }

    async fn bump(&self, username: &str, delta: i64) {
        match self.cache.get(username).await {
            Some(count) => {
                self.cache.put(username, count + delta).await;
                debug!(%username, from = count, to = count + delta, "unread_count_bumped");
            }
            None => debug!(%username, delta, "unread_count_not_cached"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::mock::{CacheCall, MockCounterCache};
    use crate::user::domain::UserRef;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn identity(name: &str) -> Identity {
        Identity::authenticated(UserRef { id: Uuid::new_v4(), username: name.into() })
    }

    #[tokio::test]
    async fn anonymous_gets_zero_without_cache_access() {
        let mock = Arc::new(MockCounterCache::default());
        let unread = UnreadCountCache::new(mock.clone());
        let loads = AtomicUsize::new(0);

        let count = unread
            .current_user_new_pm_count(&Identity::anonymous(), |_| async {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(5)
            })
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert_eq!(loads.load(Ordering::SeqCst), 0);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn cached_value_is_returned_without_loading() {
        let mock = Arc::new(MockCounterCache::default());
        mock.preload("alice", 7);
        let unread = UnreadCountCache::new(mock.clone());

        let count = unread
            .current_user_new_pm_count(&identity("alice"), |_| async { Err(ServiceError::Db("count query must not run".into())) })
            .await
            .unwrap();

        assert_eq!(count, 7);
        assert!(!mock.calls().iter().any(|c| matches!(c, CacheCall::Put(..))));
    }

    #[tokio::test]
    async fn cold_entry_loads_once_and_stores() {
        let mock = Arc::new(MockCounterCache::default());
        let unread = UnreadCountCache::new(mock.clone());
        let loads = AtomicUsize::new(0);

        for _ in 0..2 {
            let count = unread
                .current_user_new_pm_count(&identity("bob"), |username| {
                    assert_eq!(username, "bob");
                    loads.fetch_add(1, Ordering::SeqCst);
                    async { Ok(3) }
                })
                .await
                .unwrap();
            assert_eq!(count, 3);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(mock.peek("bob"), Some(3));
    }

    #[tokio::test]
    async fn load_failure_leaves_entry_absent() {
        let mock = Arc::new(MockCounterCache::default());
        let unread = UnreadCountCache::new(mock.clone());

        let res = unread
            .current_user_new_pm_count(&identity("dave"), |_| async { Err(ServiceError::Db("down".into())) })
            .await;

        assert!(matches!(res, Err(ServiceError::Db(_))));
        assert_eq!(mock.peek("dave"), None);
    }

    #[tokio::test]
    async fn bumps_on_absent_entry_are_noops() {
        let mock = Arc::new(MockCounterCache::default());
        let unread = UnreadCountCache::new(mock.clone());

        unread.increment_for("carol").await;
        unread.decrement_for("carol").await;

        assert_eq!(mock.peek("carol"), None);
        assert!(!unread.is_populated("carol").await);
    }

    #[tokio::test]
    async fn bumps_adjust_populated_entry_without_floor() {
        let mock = Arc::new(MockCounterCache::default());
        mock.preload("erin", 1);
        let unread = UnreadCountCache::new(mock.clone());

        unread.increment_for("erin").await;
        assert_eq!(mock.peek("erin"), Some(2));

        unread.decrement_for("erin").await;
        unread.decrement_for("erin").await;
        unread.decrement_for("erin").await;
        assert_eq!(mock.peek("erin"), Some(-1));
    }

    #[tokio::test]
    async fn evicted_entry_is_repopulated_on_next_read() {
        let mock = Arc::new(MockCounterCache::default());
        mock.preload("frank", 9);
        let unread = UnreadCountCache::new(mock.clone());

        mock.evict("frank");
        let count = unread
            .current_user_new_pm_count(&identity("frank"), |_| async { Ok(2) })
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(mock.peek("frank"), Some(2));
    }
}
