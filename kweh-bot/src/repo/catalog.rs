use crate::models::search::SearchResponse;
use crate::repo::RepoResult;
use kweh_core::{ItemId, RecordKind};

/// Read-only access to the game-data catalog.
#[async_trait::async_trait]
pub trait CatalogRepo: Send + Sync {
    /// Free-text search restricted to `index` (e.g. "Item"), at most `limit` hits.
    async fn search(&self, name: &str, limit: u32, index: &str) -> RepoResult<SearchResponse>;

    /// The record body exactly as the catalog serialized it. Not-found and any other
    /// non-success status are errors.
    async fn get_raw(&self, kind: RecordKind, id: ItemId) -> RepoResult<String>;
}
