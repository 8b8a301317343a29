use crate::models::item::ItemRecord;
use crate::models::recipe::RecipeRecord;
use crate::services::CatalogService;
use kweh_core::ItemId;
use std::sync::Arc;

/// Maximum number of "used in" recipes fetched and listed per item.
pub const USED_IN_LIMIT: usize = 5;

/// Walks the recipe graph around an item: the recipe that makes it and the recipes it feeds.
pub struct RecipeService {
    catalog: Arc<CatalogService>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsedInEntry {
    pub name: String,
    /// Item produced by the referencing recipe.
    pub result_id: ItemId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsedIn {
    pub entries: Vec<UsedInEntry>,
    /// Number of referencing recipes, listed or not.
    pub total: usize,
}

impl UsedIn {
    /// References beyond the processing cap, summarised as "+N more".
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(USED_IN_LIMIT)
    }
}

impl RecipeService {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }

    /// The first recipe listed on the item, if any and if the catalog still has it.
    pub async fn primary_recipe(&self, item: &ItemRecord) -> Option<RecipeRecord> {
        let id = item.primary_recipe_id()?;
        self.catalog.get_recipe(id).await
    }

    /// Recipes using `item` as an ingredient, fetched one at a time until [`USED_IN_LIMIT`]
    /// named entries are collected. Unnamed or missing records are skipped and do not count.
    pub async fn used_in(&self, item: &ItemRecord) -> UsedIn {
        let links = &item.game_content_links;
        let mut entries = Vec::new();

        for id in links.recipe_references() {
            if entries.len() == USED_IN_LIMIT {
                break;
            }

            let Some(recipe) = self.catalog.get_recipe(id).await else {
                continue;
            };
            let Some(name) = recipe.name.clone() else {
                continue;
            };
            entries.push(UsedInEntry { name, result_id: recipe.result_id() });
        }

        UsedIn {
            entries,
            total: links.recipe_reference_count(),
        }
    }
}
