use kweh_core::ItemId;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A crafting recipe as returned by the catalog's `recipe/{id}` endpoint.
///
/// The catalog spreads ingredients over numbered keys (`ItemIngredient0`, `AmountIngredient0`, ...).
/// They are folded into [`RecipeRecord::ingredients`] while decoding; the list ends at the first
/// slot that is missing or `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawRecipe")]
pub struct RecipeRecord {
    pub id: ItemId,
    pub name: Option<String>,
    pub item_result: Option<ItemRef>,
    pub class_job: Option<String>,
    pub recipe_book: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemRef {
    #[serde(rename = "ID")]
    pub id: ItemId,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub item: ItemRef,
    pub amount: u32,
}

impl RecipeRecord {
    /// The item this recipe produces, falling back to the recipe id itself.
    pub fn result_id(&self) -> ItemId {
        self.item_result.as_ref().map_or(self.id, |r| r.id)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawRecipe {
    #[serde(rename = "ID")]
    id: ItemId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    item_result: Option<ItemRef>,
    #[serde(default)]
    class_job: Option<ClassJob>,
    #[serde(default)]
    secret_recipe_book: Option<NamedRef>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Deserialize)]
struct ClassJob {
    #[serde(default, rename = "NameEnglish_en")]
    name_english: Option<String>,
}

#[derive(Deserialize)]
struct NamedRef {
    #[serde(default, rename = "Name")]
    name: Option<String>,
}

impl TryFrom<RawRecipe> for RecipeRecord {
    type Error = serde_json::Error;

    fn try_from(mut raw: RawRecipe) -> Result<Self, Self::Error> {
        let mut ingredients = Vec::new();
        for slot in 0.. {
            let item = match raw.rest.remove(&format!("ItemIngredient{slot}")) {
                Some(Value::Null) | None => break,
                Some(v) => serde_json::from_value::<ItemRef>(v)?,
            };
            let amount = raw
                .rest
                .get(&format!("AmountIngredient{slot}"))
                .and_then(Value::as_u64)
                .unwrap_or(0) as u32;
            ingredients.push(Ingredient { item, amount });
        }

        Ok(Self {
            id: raw.id,
            name: raw.name.filter(|n| !n.is_empty()),
            item_result: raw.item_result,
            class_job: raw.class_job.and_then(|c| c.name_english).filter(|n| !n.is_empty()),
            recipe_book: raw.secret_recipe_book.and_then(|b| b.name).filter(|n| !n.is_empty()),
            ingredients,
        })
    }
}
