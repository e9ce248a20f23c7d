//! Key/value counter caches keyed by username.

pub mod moka;
pub mod unread;

pub use self::moka::MokaCounterCache;
pub use unread::UnreadCountCache;

use async_trait::async_trait;

/// Minimal contract of the external counter cache: existence check, read, overwrite.
/// Expiry and eviction belong to the implementation.
#[async_trait]
pub trait CounterCache: Send + Sync {
    async fn contains_key(&self, key: &str) -> bool;
    async fn get(&self, key: &str) -> Option<i64>;
    async fn put(&self, key: &str, value: i64);
}

/// Recording in-memory cache for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum CacheCall {
        Contains(String),
        Get(String),
        Put(String, i64),
    }

    #[derive(Default)]
    pub struct MockCounterCache {
        entries: Mutex<HashMap<String, i64>>,
        calls: Mutex<Vec<CacheCall>>,
    }

    impl MockCounterCache {
        /// Seed an entry without recording a call.
        pub fn preload(&self, key: &str, value: i64) {
            self.entries.lock().unwrap().insert(key.to_string(), value);
        }

        /// Read an entry without recording a call.
        pub fn peek(&self, key: &str) -> Option<i64> {
            self.entries.lock().unwrap().get(key).copied()
        }

        /// Simulate eviction by the cache's own policy.
        pub fn evict(&self, key: &str) {
            self.entries.lock().unwrap().remove(key);
        }

        pub fn calls(&self) -> Vec<CacheCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CounterCache for MockCounterCache {
        async fn contains_key(&self, key: &str) -> bool {
            self.calls.lock().unwrap().push(CacheCall::Contains(key.to_string()));
            self.entries.lock().unwrap().contains_key(key)
        }

        async fn get(&self, key: &str) -> Option<i64> {
            self.calls.lock().unwrap().push(CacheCall::Get(key.to_string()));
            self.entries.lock().unwrap().get(key).copied()
        }

        async fn put(&self, key: &str, value: i64) {
            self.calls.lock().unwrap().push(CacheCall::Put(key.to_string(), value));
            self.entries.lock().unwrap().insert(key.to_string(), value);
        }
    }
}
