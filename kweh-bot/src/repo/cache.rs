use crate::repo::RepoResult;
use std::time::Duration;

/// Key/value store with per-entry expiry, holding serialized catalog records.
#[async_trait::async_trait]
pub trait CacheRepo: Send + Sync {
    /// Returns `None` if the key is absent or expired.
    async fn get(&self, key: &str) -> RepoResult<Option<String>>;

    /// Upsert; the entry expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()>;
}
