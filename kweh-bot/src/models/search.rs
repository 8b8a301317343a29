use kweh_core::ItemId;
use serde::Deserialize;

use crate::models::item::null_as_default;

/// Response body of the catalog's `search` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pagination {
    /// Number of hits on this page
    #[serde(default)]
    pub results: u32,
}

/// A single candidate returned by a name search. Only carries enough to pick from a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchHit {
    #[serde(rename = "ID")]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
}

impl SearchResponse {
    /// Hits, or nothing when the catalog reports zero results.
    pub fn into_hits(self) -> Vec<SearchHit> {
        if self.pagination.results == 0 {
            return Vec::new();
        }
        self.results
    }
}
