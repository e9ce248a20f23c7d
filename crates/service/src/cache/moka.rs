//! Counter cache backed by `moka`, with size limit and TTL.

use std::time::Duration;

use async_trait::async_trait;
use ::moka::future::Cache;

use configs::CacheConfig;
use super::CounterCache;

pub struct MokaCounterCache {
    inner: Cache<String, i64>,
}

impl MokaCounterCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self { inner: Cache::builder().max_capacity(capacity).time_to_live(ttl).build() }
    }

    pub fn from_config(cfg: &CacheConfig) -> Self {
        let mut builder = Cache::builder()
            .max_capacity(cfg.unread_capacity)
            .time_to_live(Duration::from_secs(cfg.unread_ttl_secs));
        if let Some(idle) = cfg.unread_idle_secs {
            builder = builder.time_to_idle(Duration::from_secs(idle));
        }
        Self { inner: builder.build() }
    }

    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[async_trait]
impl CounterCache for MokaCounterCache {
    async fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    async fn get(&self, key: &str) -> Option<i64> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: i64) {
        self.inner.insert(key.to_string(), value).await;
    }
}
