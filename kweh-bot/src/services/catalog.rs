use crate::models::item::ItemRecord;
use crate::models::recipe::RecipeRecord;
use crate::models::search::SearchHit;
use crate::repo::{CacheRepo, CatalogRepo, RepoError};
use kweh_core::{ItemId, RecordKind};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Search scope passed to the catalog on every name lookup.
const SEARCH_INDEX: &str = "Item";

/// Catalog reads with a cache in front of by-id lookups.
///
/// Nothing here returns an error: failures are logged and surface as "no results" / `None`,
/// so callers cannot tell a transport failure from a missing record.
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepo>,
    cache: Arc<dyn CacheRepo>,
    search_limit: u32,
    cache_ttl: Duration,
}

impl CatalogService {
    pub fn new(
        catalog: Arc<dyn CatalogRepo>,
        cache: Arc<dyn CacheRepo>,
        search_limit: u32,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            catalog,
            cache,
            search_limit,
            cache_ttl,
        }
    }

    /// Free-text search over items. Not cached.
    pub async fn search_by_name(&self, name: &str) -> Vec<SearchHit> {
        match self.catalog.search(name, self.search_limit, SEARCH_INDEX).await {
            Ok(response) => response.into_hits(),
            Err(e) => {
                tracing::warn!(error = %e, %name, "catalog search failed");
                Vec::new()
            }
        }
    }

    pub async fn get_item(&self, id: ItemId) -> Option<ItemRecord> {
        self.get_by_id(RecordKind::Item, id).await
    }

    pub async fn get_recipe(&self, id: ItemId) -> Option<RecipeRecord> {
        self.get_by_id(RecordKind::Recipe, id).await
    }

    /// Cache-aside fetch. A cache hit is trusted as-is; a miss is fetched upstream and written
    /// back with the configured TTL.
    pub async fn get_by_id<T: DeserializeOwned>(&self, kind: RecordKind, id: ItemId) -> Option<T> {
        let key = kind.cache_key(id);

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(record) => {
                    tracing::debug!(%key, "found in cache");
                    return Some(record);
                }
                Err(e) => tracing::warn!(error = %e, %key, "cached record does not decode, refetching"),
            },
            Ok(None) => tracing::debug!(%key, "cache miss"),
            Err(e) => tracing::warn!(error = %e, %key, "cache read failed"),
        }

        let raw = match self.catalog.get_raw(kind, id).await {
            Ok(raw) => raw,
            Err(RepoError::NotFound) => {
                tracing::debug!(%kind, %id, "not in catalog");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, %kind, %id, "catalog fetch failed");
                return None;
            }
        };

        let record = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, %kind, %id, "catalog record does not decode");
                return None;
            }
        };

        tracing::debug!(%kind, %id, "found in catalog");
        self.store(&key, &raw).await;
        Some(record)
    }

    /// Best-effort cache write.
    async fn store(&self, key: &str, raw: &str) {
        if let Err(e) = self.cache.set(key, raw, self.cache_ttl).await {
            tracing::warn!(error = %e, %key, "cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search::SearchResponse;
    use crate::repo::{MemoryCache, RepoResult};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct CountingCatalog {
        fetches: Mutex<Vec<(RecordKind, ItemId)>>,
        fail_search: bool,
    }

    #[async_trait]
    impl CatalogRepo for CountingCatalog {
        async fn search(&self, name: &str, _limit: u32, _index: &str) -> RepoResult<SearchResponse> {
            if self.fail_search {
                return Err(RepoError::Status(503));
            }
            let body = format!(r#"{{"Pagination":{{"Results":1}},"Results":[{{"ID":1,"Name":"{name}"}}]}}"#);
            Ok(serde_json::from_str(&body)?)
        }

        async fn get_raw(&self, kind: RecordKind, id: ItemId) -> RepoResult<String> {
            self.fetches.lock().push((kind, id));
            match id.0 {
                404 => Err(RepoError::NotFound),
                500 => Err(RepoError::Status(500)),
                _ => Ok(format!(r#"{{"ID":{id},"Name":"Thing {id}"}}"#)),
            }
        }
    }

    struct BrokenCache;

    #[async_trait]
    impl CacheRepo for BrokenCache {
        async fn get(&self, _key: &str) -> RepoResult<Option<String>> {
            Err(RepoError::Status(0))
        }
        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> RepoResult<()> {
            Err(RepoError::Status(0))
        }
    }

    fn service(catalog: Arc<CountingCatalog>, cache: Arc<dyn CacheRepo>) -> CatalogService {
        CatalogService::new(catalog, cache, 10, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let catalog = Arc::new(CountingCatalog::default());
        let svc = service(catalog.clone(), Arc::new(MemoryCache::new()));

        let first = svc.get_item(ItemId(5057)).await.unwrap();
        let second = svc.get_item(ItemId(5057)).await.unwrap();

        assert_eq!(first.name, second.name);
        assert_eq!(catalog.fetches.lock().len(), 1);
    }

    #[tokio::test]
    async fn item_and_recipe_with_same_id_are_cached_separately() {
        let catalog = Arc::new(CountingCatalog::default());
        let svc = service(catalog.clone(), Arc::new(MemoryCache::new()));

        svc.get_item(ItemId(7)).await.unwrap();
        svc.get_recipe(ItemId(7)).await.unwrap();
        svc.get_recipe(ItemId(7)).await.unwrap();

        assert_eq!(*catalog.fetches.lock(), vec![(RecordKind::Item, ItemId(7)), (RecordKind::Recipe, ItemId(7))]);
    }

    #[tokio::test]
    async fn failures_degrade_to_none_and_are_not_cached() {
        let catalog = Arc::new(CountingCatalog::default());
        let cache = Arc::new(MemoryCache::new());
        let svc = service(catalog.clone(), cache.clone());

        assert!(svc.get_item(ItemId(404)).await.is_none());
        assert!(svc.get_item(ItemId(500)).await.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn broken_cache_still_reaches_the_catalog() {
        let catalog = Arc::new(CountingCatalog::default());
        let svc = service(catalog.clone(), Arc::new(BrokenCache));

        assert!(svc.get_item(ItemId(1)).await.is_some());
        assert!(svc.get_item(ItemId(1)).await.is_some());
        assert_eq!(catalog.fetches.lock().len(), 2);
    }

    #[tokio::test]
    async fn search_failure_is_an_empty_result() {
        let catalog = Arc::new(CountingCatalog { fail_search: true, ..Default::default() });
        let svc = service(catalog, Arc::new(MemoryCache::new()));
        assert!(svc.search_by_name("Potion").await.is_empty());
    }

    #[tokio::test]
    async fn search_returns_hits() {
        let svc = service(Arc::new(CountingCatalog::default()), Arc::new(MemoryCache::new()));
        let hits = svc.search_by_name("Potion").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Potion");
    }
}
