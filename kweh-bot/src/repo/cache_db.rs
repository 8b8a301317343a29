use crate::db::Db;
use crate::repo::cache::CacheRepo;
use crate::repo::RepoResult;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Cache backed by the `catalog_cache` table.
pub struct PgCache {
    pub db: Arc<Db>,
}

impl PgCache {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CacheRepo for PgCache {
    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let client = self.db.get_client().await?;
        let row_opt = client
            .query_opt(
                "SELECT value
                FROM catalog_cache
                WHERE key = $1 AND expires_at > now()",
                &[&key],
            )
            .await?;

        Ok(row_opt.map(|r| r.get::<_, String>(0)))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()> {
        let expires_at: DateTime<Utc> = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let client = self.db.get_client().await?;
        client
            .execute(
                "INSERT INTO catalog_cache (key, value, expires_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, expires_at = EXCLUDED.expires_at",
                &[&key, &value, &expires_at],
            )
            .await?;
        Ok(())
    }
}
