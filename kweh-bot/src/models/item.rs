use indexmap::IndexMap;
use kweh_core::ItemId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Cross-reference category listing the recipes an item takes part in.
pub const RECIPE_CATEGORY: &str = "Recipe";
/// Slot under [`RECIPE_CATEGORY`] pointing at the recipe that produces the item itself.
pub const SELF_REFERENCE_SLOT: &str = "ItemResult";

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n|\r").unwrap());

/// An item as returned by the catalog's `item/{id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemRecord {
    #[serde(rename = "ID")]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "Description_en")]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Zero means "not equippable".
    #[serde(default, rename = "EquipSlotCategoryTargetID")]
    pub equip_slot_category: Option<u32>,
    #[serde(default, deserialize_with = "de_level")]
    pub level_item: Option<u32>,
    #[serde(default, deserialize_with = "de_level")]
    pub level_equip: Option<u32>,
    #[serde(default, deserialize_with = "de_flag")]
    pub is_dyeable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipes: Vec<RecipeRef>,
    #[serde(default)]
    pub game_content_links: ContentLinks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RecipeRef {
    #[serde(rename = "ID")]
    pub id: ItemId,
}

impl ItemRecord {
    pub fn is_equipment(&self) -> bool {
        self.equip_slot_category.is_some_and(|c| c > 0)
    }

    /// Description flattened onto a single line, `None` when there is nothing to show.
    pub fn description_line(&self) -> Option<String> {
        let raw = self.description.as_deref()?;
        let line = LINE_BREAK_RE.replace_all(raw, " ");
        let line = line.trim();
        if line.is_empty() { None } else { Some(line.to_string()) }
    }

    pub fn primary_recipe_id(&self) -> Option<ItemId> {
        self.recipes.first().map(|r| r.id)
    }
}

/// Category name -> slot key -> ids of the records referencing this item, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentLinks(IndexMap<String, IndexMap<String, Vec<ItemId>>>);

impl ContentLinks {
    pub fn category(&self, name: &str) -> Option<&IndexMap<String, Vec<ItemId>>> {
        self.0.get(name)
    }

    /// Drops the "this item is the result of its own recipe" entry. Returns whether it was present.
    pub fn remove_self_reference(&mut self) -> bool {
        self.0
            .get_mut(RECIPE_CATEGORY)
            .and_then(|slots| slots.shift_remove(SELF_REFERENCE_SLOT))
            .is_some()
    }

    fn recipe_slots(&self) -> impl Iterator<Item = &Vec<ItemId>> + '_ {
        self.category(RECIPE_CATEGORY)
            .into_iter()
            .flat_map(|slots| slots.iter())
            .filter(|(slot, _)| slot.as_str() != SELF_REFERENCE_SLOT)
            .map(|(_, ids)| ids)
    }

    /// Every recipe id using this item as an ingredient, slot by slot. Never includes the self-reference.
    pub fn recipe_references(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.recipe_slots().flat_map(|ids| ids.iter().copied())
    }

    pub fn recipe_reference_count(&self) -> usize {
        self.recipe_slots().map(Vec::len).sum()
    }
}

// The catalog serializes an empty mapping as `[]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose<T> {
    Map(IndexMap<String, T>),
    Empty(#[allow(dead_code)] Vec<IgnoredAny>),
}

impl<T> Loose<T> {
    fn into_map(self) -> IndexMap<String, T> {
        match self {
            Loose::Map(m) => m,
            Loose::Empty(_) => IndexMap::new(),
        }
    }
}

impl<'de> Deserialize<'de> for ContentLinks {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Option::<Loose<Loose<Vec<ItemId>>>>::deserialize(d)?;
        let links = raw
            .map(Loose::into_map)
            .unwrap_or_default()
            .into_iter()
            .map(|(category, slots)| (category, slots.into_map()))
            .collect();
        Ok(Self(links))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Level {
    Plain(u32),
    Linked {
        #[serde(rename = "ID")]
        id: u32,
    },
}

fn de_level<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<Level>::deserialize(d)?.map(|l| match l {
        Level::Plain(v) => v,
        Level::Linked { id } => id,
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

fn de_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Option::<Flag>::deserialize(d)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n != 0,
        None => false,
    })
}

pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(v: serde_json::Value) -> ItemRecord {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn minimal_item_decodes_with_defaults() {
        let item = decode(json!({ "ID": 4551, "Name": "Potion" }));
        assert_eq!(item.id, ItemId(4551));
        assert!(!item.is_equipment());
        assert!(!item.is_dyeable);
        assert!(item.recipes.is_empty());
        assert_eq!(item.game_content_links.recipe_reference_count(), 0);
    }

    #[test]
    fn equipment_is_gated_on_a_non_zero_slot_category() {
        assert!(!decode(json!({ "ID": 1, "EquipSlotCategoryTargetID": 0 })).is_equipment());
        assert!(decode(json!({ "ID": 1, "EquipSlotCategoryTargetID": 3 })).is_equipment());
    }

    #[test]
    fn levels_and_flags_accept_loose_shapes() {
        let item = decode(json!({
            "ID": 1,
            "LevelItem": { "ID": 530 },
            "LevelEquip": 80,
            "IsDyeable": 1,
            "Recipes": null,
            "GameContentLinks": []
        }));
        assert_eq!(item.level_item, Some(530));
        assert_eq!(item.level_equip, Some(80));
        assert!(item.is_dyeable);
        assert!(item.recipes.is_empty());
    }

    #[test]
    fn description_is_collapsed_onto_one_line() {
        let item = decode(json!({ "ID": 1, "Description_en": "Restores HP.\r\nShares recast.\nLine\rend\n" }));
        assert_eq!(item.description_line().as_deref(), Some("Restores HP. Shares recast. Line end"));

        let blank = decode(json!({ "ID": 1, "Description_en": "\n" }));
        assert_eq!(blank.description_line(), None);
    }

    #[test]
    fn content_links_keep_catalog_order_and_drop_self_reference() {
        // Parsed from text so key order is the catalog's, not the json! macro's.
        let mut item: ItemRecord = serde_json::from_str(r#"{
            "ID": 5057,
            "GameContentLinks": {
                "Recipe": {
                    "ItemIngredient1": [30, 31],
                    "ItemResult": [99],
                    "ItemIngredient0": [10]
                },
                "Quest": { "ItemReward0": [7] },
                "GilShopItem": []
            }
        }"#).unwrap();

        assert_eq!(item.game_content_links.recipe_reference_count(), 3);
        assert!(item.game_content_links.remove_self_reference());
        assert!(!item.game_content_links.remove_self_reference());

        let ids: Vec<ItemId> = item.game_content_links.recipe_references().collect();
        assert_eq!(ids, vec![ItemId(30), ItemId(31), ItemId(10)]);
        assert_eq!(item.game_content_links.recipe_reference_count(), 3);
        assert!(item.game_content_links.category("GilShopItem").is_some_and(|s| s.is_empty()));
    }

    #[test]
    fn empty_arrays_stand_in_for_empty_maps() {
        let top = decode(json!({ "ID": 1, "GameContentLinks": [] }));
        assert_eq!(top.game_content_links, ContentLinks::default());

        let mut nested = decode(json!({ "ID": 1, "GameContentLinks": { "Recipe": [] } }));
        assert!(nested.game_content_links.category(RECIPE_CATEGORY).is_some_and(|s| s.is_empty()));
        assert_eq!(nested.game_content_links.recipe_reference_count(), 0);
        assert!(!nested.game_content_links.remove_self_reference());
    }
}
