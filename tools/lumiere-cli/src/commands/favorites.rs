//! Favorites management commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use lumiere_cache::FileStore;
use lumiere_commerce::storefront::Storefront;
use lumiere_commerce::ProductId;

use super::{FavoritesArgs, FavoritesCommand};
use crate::context::Context;

/// Run the favorites command.
pub async fn run(args: FavoritesArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.storefront()?;

    match args.command {
        Some(FavoritesCommand::List) | None => list_favorites(&shop, ctx),
        Some(FavoritesCommand::Add { id }) => add_favorite(&mut shop, &id, ctx),
        Some(FavoritesCommand::Remove { id }) => remove_favorite(&mut shop, &id, ctx),
        Some(FavoritesCommand::Toggle { id }) => toggle_favorite(&mut shop, &id, ctx),
        Some(FavoritesCommand::Clear { yes }) => clear_favorites(&mut shop, yes, ctx),
    }
}

fn list_favorites(shop: &Storefront<FileStore>, ctx: &Context) -> Result<()> {
    let favorites = shop.favorites();

    if ctx.output.is_json() {
        ctx.output.json(&favorites.ids());
        return Ok(());
    }

    ctx.output.header(&format!("Favorites ({})", favorites.len()));
    if favorites.is_empty() {
        ctx.output.info("No favorites saved.");
        ctx.output.info("Run `lumiere favorites add <id>` to save one.");
        return Ok(());
    }

    for id in favorites.ids() {
        match shop.catalog().get(id.as_str()) {
            Some(product) => ctx.output.list_item(&format!("{} - {} ({})", id, product.name, product.price())),
            None => ctx.output.list_item(&format!("{} (no longer in catalog)", id)),
        }
    }

    Ok(())
}

fn add_favorite(shop: &mut Storefront<FileStore>, id: &str, ctx: &Context) -> Result<()> {
    require_known(shop, id)?;
    if shop.favorites_mut().add(id) {
        shop.favorites().flush()?;
        ctx.output.success(&format!("Saved {}", id));
    } else {
        ctx.output.info(&format!("{} is already saved", id));
    }
    Ok(())
}

fn remove_favorite(shop: &mut Storefront<FileStore>, id: &str, ctx: &Context) -> Result<()> {
    if shop.favorites_mut().remove(&ProductId::new(id)) {
        shop.favorites().flush()?;
        ctx.output.success(&format!("Removed {}", id));
    } else {
        ctx.output.warn(&format!("{} was not saved", id));
    }
    Ok(())
}

fn toggle_favorite(shop: &mut Storefront<FileStore>, id: &str, ctx: &Context) -> Result<()> {
    require_known(shop, id)?;
    let saved = shop.favorites_mut().toggle(id);
    shop.favorites().flush()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "id": id, "saved": saved }));
    } else if saved {
        ctx.output.success(&format!("Saved {}", id));
    } else {
        ctx.output.success(&format!("Removed {}", id));
    }
    Ok(())
}

fn clear_favorites(shop: &mut Storefront<FileStore>, yes: bool, ctx: &Context) -> Result<()> {
    let count = shop.favorites().len();
    if count == 0 {
        ctx.output.info("No favorites saved.");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Forget all {} favorites?", count))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    shop.favorites_mut().clear();
    shop.favorites().flush()?;
    ctx.output.success(&format!("Cleared {} favorites", count));
    Ok(())
}

fn require_known(shop: &Storefront<FileStore>, id: &str) -> Result<()> {
    if shop.catalog().get(id).is_none() {
        bail!("Unknown product: {}", id);
    }
    Ok(())
}
