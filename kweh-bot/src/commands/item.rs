mod disambiguate;

use crate::commands::{CmdCtx, CommandError, CommandResult};
use crate::error::{AppResult, DomainError};
use crate::models::item::ItemRecord;
use crate::rendering::item_view::{item_embed, used_in_value, FIELD_INGREDIENT_FOR};
use crate::rendering::Surface;
use std::sync::Arc;
use tracing::{debug, error, info};

pub use disambiguate::{await_selection, parse_option, Selection};

pub(super) const USAGE: &str = "item <name>";

/// `item <name>`: search, let the user pick when several items match, then show the item in two
/// phases (summary first, "Ingredient For" patched in once the recipes are resolved).
pub async fn item(ctx: Arc<CmdCtx>, query: &str) -> CommandResult<()> {
    if query.is_empty() {
        return Err(CommandError::Usage(USAGE));
    }
    info!(%query, channel = %ctx.invocation.channel, "item lookup");

    match resolve(&ctx, query).await {
        Ok(item) => show_item(&ctx, item).await,
        Err(DomainError::NoSelection) => ctx.send_error("Error", "No item was specified").await,
        Err(e) => {
            debug!(error = %e, "lookup came up empty");
            ctx.send_error("Error", &format!("Couldn't find any item matching \"{query}\"")).await;
        }
    }
    Ok(())
}

async fn resolve(ctx: &CmdCtx, query: &str) -> AppResult<ItemRecord> {
    let catalog = &ctx.registry.services.catalog;
    let hits = catalog.search_by_name(query).await;

    let hit = match hits.len() {
        0 => return Err(DomainError::NoMatchingItem(query.to_string())),
        1 => &hits[0],
        _ => disambiguate::choose(ctx, query, &hits).await?,
    };

    catalog
        .get_item(hit.id)
        .await
        .ok_or_else(|| DomainError::NoMatchingItem(query.to_string()))
}

async fn show_item(ctx: &CmdCtx, mut item: ItemRecord) {
    let services = &ctx.registry.services;
    let transport = ctx.transport.as_ref();

    if item.game_content_links.remove_self_reference() {
        debug!(item = %item.id, "dropped self reference from content links");
    }

    let recipe = services.recipe.primary_recipe(&item).await;
    let embed = item_embed(ctx.config(), &item, recipe.as_ref());
    let pending = embed.field(FIELD_INGREDIENT_FOR).is_some();

    let channel = ctx.invocation.target_channel().clone();
    let mut surface = match Surface::send(transport, channel, embed).await {
        Ok(surface) => surface,
        Err(e) => {
            error!(error = %e, item = %item.id, "failed to post item");
            return;
        }
    };

    if !pending {
        return;
    }

    let used_in = services.recipe.used_in(&item).await;
    debug!(item = %item.id, listed = used_in.entries.len(), total = used_in.total, "resolved used-in recipes");

    let value = used_in_value(ctx.config(), item.id, &used_in);
    if let Err(e) = surface.patch_field(transport, FIELD_INGREDIENT_FOR, value).await {
        error!(error = %e, message = %surface.message, "failed to update item message");
    }
}
