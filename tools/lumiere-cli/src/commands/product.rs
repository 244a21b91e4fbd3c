//! Product detail command.

use anyhow::Result;

use super::ProductArgs;
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let product = shop.catalog().require(&args.id)?;
    let favorite = shop.favorites().contains(&product.id);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": product,
            "favorite": favorite,
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Category", product.category.display_name());
    ctx.output.kv("Price", &product.price());
    ctx.output.kv("Added", &product.created_at.format("%Y-%m-%d").to_string());
    ctx.output.kv("Surface", product.surface.as_str());
    if product.has_gem {
        ctx.output.kv("Gems", &product.gemstones.join(", "));
    }
    if product.is_one_size() {
        ctx.output.kv("Sizes", "one size");
    } else {
        let sizes: Vec<String> = product.sizes.iter().map(u16::to_string).collect();
        ctx.output.kv("Sizes", &sizes.join(", "));
    }
    if product.is_best_seller {
        ctx.output.kv("Best seller", "yes");
    }
    ctx.output.kv("Favorite", if favorite { "yes" } else { "no" });

    ctx.output.info("");
    ctx.output.info("Colors:");
    for variant in &product.variants {
        ctx.output.list_item(&format!("{} ({} images)", variant.color, variant.images.len()));
        if ctx.output.is_verbose() {
            for image in &variant.images {
                ctx.output.debug(image);
            }
        }
    }

    Ok(())
}
