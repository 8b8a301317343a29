use crate::repo::cache::CacheRepo;
use crate::repo::RepoResult;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How often [`MemoryCache::spawn_sweeper`] drops entries that expired without being read again.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Process-local cache. Expired entries are evicted lazily on read.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every expired entry and returns how many went.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| e.expires_at > now);
        before.saturating_sub(self.entries.len())
    }

    /// Purges `cache` every `period` until the last other handle to it is dropped.
    pub fn spawn_sweeper(cache: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let cache = Arc::downgrade(cache);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let purged = cache.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, remaining = cache.len(), "swept expired cache entries");
                }
            }
        })
    }
}

#[async_trait]
impl CacheRepo for MemoryCache {
    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let now = Utc::now();
        self.entries.remove_if(key, |_, e| e.expires_at <= now);
        Ok(self.entries.get(key).map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()> {
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.entries.insert(key.to_string(), CacheEntry { value: value.to_string(), expires_at });
        Ok(())
    }
}
