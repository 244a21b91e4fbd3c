//! Cart replay and pricing command.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use lumiere_cache::{KeyValueStore, MemoryStore};
use lumiere_commerce::cart::{CartPricing, VariantUpdate};
use lumiere_commerce::events::CartEvent;
use lumiere_commerce::storefront::Storefront;
use lumiere_commerce::LineKey;
use serde::{Deserialize, Serialize};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// One recorded cart operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CartOp {
    Add {
        product: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        size: Option<u16>,
        #[serde(default = "default_quantity")]
        quantity: u32,
    },
    Inc {
        key: LineKey,
    },
    Dec {
        key: LineKey,
    },
    Remove {
        key: LineKey,
    },
    UpdateVariant {
        key: LineKey,
        #[serde(flatten)]
        update: VariantUpdate,
    },
    ServiceOption {
        key: LineKey,
        #[serde(default)]
        option: Option<String>,
    },
    Clear,
}

fn default_quantity() -> u32 {
    1
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Price { file, events } => price_cart(&file, events, ctx),
    }
}

fn price_cart(file: &str, show_events: bool, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read operations: {}", path.display()))?;
    let ops: Vec<CartOp> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid operations file: {}", path.display()))?;

    // Favorites are irrelevant here; keep them off disk.
    let mut shop = Storefront::new(ctx.catalog()?, ctx.config.shop_config(), MemoryStore::new());

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    shop.cart_mut()
        .subscribe(move |event: &CartEvent| sink.borrow_mut().push(event.clone()));

    replay(&mut shop, &ops)?;
    let pricing = shop.checkout_summary()?;

    let events: Vec<CartEvent> = log.borrow().clone();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": shop.cart().items(),
            "pricing": pricing,
            "events": show_events.then_some(&events),
        }));
        return Ok(());
    }

    if show_events {
        ctx.output.header("Events");
        for event in &events {
            ctx.output.list_item(&serde_json::to_string(event)?);
        }
    }
    print_pricing(&pricing, ctx);
    if shop.is_drawer_open() {
        ctx.output.debug("Bag drawer is open");
    }

    Ok(())
}

/// Apply operations in order. Unknown keys are no-ops; unknown products fail.
fn replay<S: KeyValueStore>(shop: &mut Storefront<S>, ops: &[CartOp]) -> Result<()> {
    for (i, op) in ops.iter().enumerate() {
        tracing::debug!(index = i, ?op, "replaying cart op");
        match op {
            CartOp::Add {
                product,
                color,
                size,
                quantity,
            } => {
                shop.add_to_cart(product, color.as_deref(), *size, *quantity)
                    .with_context(|| format!("Operation {} failed", i + 1))?;
            }
            CartOp::Inc { key } => shop.cart_mut().inc(key),
            CartOp::Dec { key } => shop.cart_mut().dec(key),
            CartOp::Remove { key } => shop.cart_mut().remove_item(key),
            CartOp::UpdateVariant { key, update } => {
                shop.cart_mut().update_variant(key, update.clone())
            }
            CartOp::ServiceOption { key, option } => {
                shop.cart_mut().update_service_option(key, option.clone())
            }
            CartOp::Clear => shop.cart_mut().clear(),
        }
    }
    Ok(())
}

fn print_pricing(pricing: &CartPricing, ctx: &Context) {
    ctx.output.header(&format!("Bag ({} items)", pricing.item_count));
    if pricing.lines.is_empty() {
        ctx.output.info("Your bag is empty.");
        return;
    }

    let widths = [34, 10, 10, 4, 10];
    ctx.output.table_row(&["LINE", "PRICE", "FEE", "QTY", "TOTAL"], &widths);
    ctx.output.table_row(&["────", "─────", "───", "───", "─────"], &widths);
    for line in &pricing.lines {
        let fee = if line.unit_fee.is_zero() {
            "-".to_string()
        } else {
            line.unit_fee.display()
        };
        ctx.output.table_row(
            &[
                &truncate(line.key.as_str(), 34),
                &line.unit_price.display(),
                &fee,
                &line.quantity.to_string(),
                &line.total.display(),
            ],
            &widths,
        );
    }

    println!();
    if pricing.has_fees() {
        ctx.output.kv("Shipping kits", &pricing.fee_total.display());
    }
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
}
