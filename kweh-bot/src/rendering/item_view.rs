use crate::config::Config;
use crate::models::item::ItemRecord;
use crate::models::recipe::RecipeRecord;
use crate::models::search::SearchHit;
use crate::rendering::{Embed, FIELD_VALUE_MAX};
use crate::services::UsedIn;
use kweh_core::ItemId;

pub const FIELD_ITEM_LEVEL: &str = "Item Level";
pub const FIELD_MIN_LEVEL: &str = "Min. Level";
pub const FIELD_DYEABLE: &str = "Dyeable";
pub const FIELD_CRAFTER: &str = "Crafter";
pub const FIELD_INGREDIENTS: &str = "Ingredients";
pub const FIELD_RECIPE_BOOK: &str = "Recipe Book";
pub const FIELD_INGREDIENT_FOR: &str = "Ingredient For";
pub const FIELD_LINKS: &str = "Links";

const FOOTER: &str = "Powered by xivapi.com";
const PROMPT_HEADER: &str = "Which item are you looking for?";
const ERROR_COLOR: u32 = 0xE74C3C;

fn link(label: &str, url: &str) -> String {
    format!("[{label}]({url})")
}

/// First-phase item summary. The "Ingredient For" field, when present, only holds a placeholder
/// until the references are resolved.
pub fn item_embed(cfg: &Config, item: &ItemRecord, recipe: Option<&RecipeRecord>) -> Embed {
    let mut embed = Embed::new(cfg.embed_color)
        .author(item.name.clone(), cfg.catalog_logo.clone())
        .footer(FOOTER);

    if let Some(icon) = item.icon.as_deref().filter(|i| !i.is_empty()) {
        embed = embed.thumbnail(format!("{}{}", cfg.catalog_base_url.trim_end_matches('/'), icon));
    }

    if let Some(description) = item.description_line() {
        embed = embed.description(description);
    }

    if item.is_equipment() {
        if let Some(level) = item.level_item.filter(|l| *l > 0) {
            embed.add_field(FIELD_ITEM_LEVEL, level.to_string());
        }
        if let Some(level) = item.level_equip.filter(|l| *l > 0) {
            embed.add_field(FIELD_MIN_LEVEL, level.to_string());
        }
        embed.add_field(FIELD_DYEABLE, if item.is_dyeable { "Yes" } else { "No" });
    }

    if let Some(recipe) = recipe {
        add_recipe_fields(cfg, &mut embed, recipe);
    }

    let references = item.game_content_links.recipe_reference_count();
    if references > 0 {
        embed.add_field(FIELD_INGREDIENT_FOR, fetching_placeholder(references));
    }

    embed.add_field(FIELD_LINKS, link("Teamcraft", &cfg.item_link(item.id)));
    embed
}

fn add_recipe_fields(cfg: &Config, embed: &mut Embed, recipe: &RecipeRecord) {
    if let Some(job) = &recipe.class_job {
        embed.add_field(FIELD_CRAFTER, job.clone());
    }

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| {
            let name = i.item.name.as_deref().unwrap_or("Unknown item");
            format!("{} x {}", link(name, &cfg.item_link(i.item.id)), i.amount)
        })
        .collect::<Vec<_>>()
        .join("\n");
    if !ingredients.is_empty() {
        embed.add_field(FIELD_INGREDIENTS, ingredients);
    }

    if let Some(book) = &recipe.recipe_book {
        embed.add_field(FIELD_RECIPE_BOOK, book.clone());
    }
}

pub fn fetching_placeholder(count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("Fetching {count} {noun} :hourglass_flowing_sand:")
}

/// Final "Ingredient For" value: one link per resolved recipe while the field has room, then a
/// "+N more" link to the item's browse page when references were left out.
pub fn used_in_value(cfg: &Config, item_id: ItemId, used_in: &UsedIn) -> String {
    let mut value = String::new();

    let mut push_line = |line: String| {
        let extra = if value.is_empty() { line.len() } else { line.len() + 1 };
        if value.len() + extra > FIELD_VALUE_MAX {
            return;
        }
        if !value.is_empty() {
            value.push('\n');
        }
        value.push_str(&line);
    };

    for entry in &used_in.entries {
        push_line(link(&entry.name, &cfg.item_link(entry.result_id)));
    }

    let remaining = used_in.remaining();
    if remaining > 0 {
        push_line(link(&format!("+ {remaining} more items"), &cfg.item_link(item_id)));
    }

    if value.is_empty() {
        value.push_str("Nothing found");
    }
    value
}

/// Numbered candidate list, 1-based.
pub fn candidates_embed(cfg: &Config, keyword: &str, hits: &[SearchHit]) -> Embed {
    let mut description = format!("{PROMPT_HEADER}\n");
    for (i, hit) in hits.iter().enumerate() {
        description.push_str(&format!("\n{}. {}", i + 1, hit.name));
    }

    Embed::new(cfg.embed_color)
        .author(keyword, cfg.catalog_logo.clone())
        .description(description)
}

pub fn error_embed(title: &str, message: &str) -> Embed {
    Embed::new(ERROR_COLOR).title(title).description(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::UsedInEntry;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn item(v: serde_json::Value) -> ItemRecord {
        serde_json::from_value(v).unwrap()
    }

    fn names(e: &Embed) -> Vec<&str> {
        e.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn plain_item_has_description_and_links_only() {
        let cfg = Config::default();
        let potion = item(json!({
            "ID": 4551,
            "Name": "Potion",
            "Icon": "/i/020000/020001.png",
            "Description_en": "Restores HP.\nRecast: 60s",
            "GameContentLinks": []
        }));

        let e = item_embed(&cfg, &potion, None);

        assert_eq!(e.author.as_ref().unwrap().name, "Potion");
        assert_eq!(e.thumbnail.as_deref(), Some("https://xivapi.com/i/020000/020001.png"));
        assert_eq!(e.description.as_deref(), Some("Restores HP. Recast: 60s"));
        assert_eq!(e.footer.as_deref(), Some("Powered by xivapi.com"));
        assert_eq!(names(&e), vec![FIELD_LINKS]);
        assert_eq!(e.fields[0].value, "[Teamcraft](https://ffxivteamcraft.com/en/item/4551)");
    }

    #[test]
    fn equipment_fields_follow_slot_category() {
        let cfg = Config::default();
        let sword = item(json!({
            "ID": 1,
            "Name": "Iron Sword",
            "EquipSlotCategoryTargetID": 1,
            "LevelItem": 20,
            "LevelEquip": 0,
            "IsDyeable": 0
        }));

        let e = item_embed(&cfg, &sword, None);
        assert_eq!(names(&e), vec![FIELD_ITEM_LEVEL, FIELD_DYEABLE, FIELD_LINKS]);
        assert_eq!(e.field(FIELD_ITEM_LEVEL).unwrap().value, "20");
        assert_eq!(e.field(FIELD_DYEABLE).unwrap().value, "No");
    }

    #[test]
    fn recipe_fields_and_placeholder() {
        let cfg = Config::default();
        let ingot: ItemRecord = serde_json::from_str(r#"{
            "ID": 5057,
            "Name": "Iron Ingot",
            "Recipes": [{"ID": 33}],
            "GameContentLinks": {"Recipe": {"ItemResult": [33], "ItemIngredient0": [40, 41]}}
        }"#).unwrap();
        let recipe: RecipeRecord = serde_json::from_value(json!({
            "ID": 33,
            "ClassJob": { "NameEnglish_en": "Blacksmith" },
            "ItemIngredient0": { "ID": 5, "Name": "Fire Shard" },
            "AmountIngredient0": 1,
            "ItemIngredient1": { "ID": 5111, "Name": "Iron Ore" },
            "AmountIngredient1": 3
        })).unwrap();

        let e = item_embed(&cfg, &ingot, Some(&recipe));

        assert_eq!(names(&e), vec![FIELD_CRAFTER, FIELD_INGREDIENTS, FIELD_INGREDIENT_FOR, FIELD_LINKS]);
        assert_eq!(
            e.field(FIELD_INGREDIENTS).unwrap().value,
            "[Fire Shard](https://ffxivteamcraft.com/en/item/5) x 1\n[Iron Ore](https://ffxivteamcraft.com/en/item/5111) x 3"
        );
        assert_eq!(e.field(FIELD_INGREDIENT_FOR).unwrap().value, "Fetching 2 items :hourglass_flowing_sand:");
    }

    #[test]
    fn placeholder_is_singular_for_one() {
        assert_eq!(fetching_placeholder(1), "Fetching 1 item :hourglass_flowing_sand:");
    }

    fn entries(n: usize) -> Vec<UsedInEntry> {
        (0..n)
            .map(|i| UsedInEntry { name: format!("Thing {i}"), result_id: ItemId(100 + i as u64) })
            .collect()
    }

    #[test]
    fn used_in_appends_more_line_only_past_the_cap() {
        let cfg = Config::default();

        let eight = used_in_value(&cfg, ItemId(5057), &UsedIn { entries: entries(5), total: 8 });
        let lines: Vec<_> = eight.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5], "[+ 3 more items](https://ffxivteamcraft.com/en/item/5057)");

        let five = used_in_value(&cfg, ItemId(5057), &UsedIn { entries: entries(5), total: 5 });
        assert_eq!(five.lines().count(), 5);
        assert!(!five.contains("more items"));
    }

    #[test]
    fn used_in_respects_the_field_limit() {
        let cfg = Config::default();
        let long = vec![UsedInEntry { name: "x".repeat(600), result_id: ItemId(1) }; 3];
        let value = used_in_value(&cfg, ItemId(1), &UsedIn { entries: long, total: 3 });
        assert!(value.len() <= FIELD_VALUE_MAX);
        assert_eq!(value.lines().count(), 1);
    }

    #[test]
    fn candidates_are_numbered_from_one() {
        let cfg = Config::default();
        let hits: Vec<SearchHit> = serde_json::from_value(json!([
            { "ID": 1, "Name": "Iron Ore" },
            { "ID": 2, "Name": "Iron Ingot" },
            { "ID": 3, "Name": "Iron Sword" }
        ])).unwrap();

        let e = candidates_embed(&cfg, "Iron", &hits);
        assert_eq!(e.author.as_ref().unwrap().name, "Iron");
        assert_eq!(
            e.description.as_deref(),
            Some("Which item are you looking for?\n\n1. Iron Ore\n2. Iron Ingot\n3. Iron Sword")
        );
    }
}
