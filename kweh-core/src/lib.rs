use std::fmt;
use serde::{Deserialize, Serialize};


/// Stable catalog identifier of an item or recipe record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);


impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}


/// The kind of record stored in the catalog. Doubles as the URL segment and cache namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Item,
    Recipe,
}


impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Item => "item",
            RecordKind::Recipe => "recipe",
        }
    }

    /// Namespaced cache key, e.g. `kweh_item:5057`.
    pub fn cache_key(&self, id: ItemId) -> String {
        format!("kweh_{}:{}", self.as_str(), id)
    }
}


impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
