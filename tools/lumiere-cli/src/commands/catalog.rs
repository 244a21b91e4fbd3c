//! Catalog browsing command.

use anyhow::{anyhow, Result};
use lumiere_commerce::catalog::{Catalog, CategoryFilter};
use lumiere_commerce::search::{browse, Appearance, CatalogView, FilterState, PriceRange, SortOption};
use lumiere_commerce::Money;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{selected_marker, truncate};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let shop = ctx.config.shop_config();

    let state = filter_state(&args, &catalog, shop.shop.default_category)?;
    tracing::debug!(category = %state.category, page = state.page, "browsing catalog");

    let view = browse(&catalog, &state, shop.page_size(args.viewport));

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    print_view(&view, ctx);
    if args.facets {
        print_facets(&view, ctx);
    }

    Ok(())
}

/// Translate command-line flags into a filter state.
fn filter_state(args: &CatalogArgs, catalog: &Catalog, default: CategoryFilter) -> Result<FilterState> {
    let category = match &args.category {
        Some(slug) => CategoryFilter::from_str(slug).ok_or_else(|| anyhow!("Unknown category: {}", slug))?,
        None => default,
    };
    let mut state = FilterState::new(catalog, category);

    if args.min_price.is_some() || args.max_price.is_some() {
        let currency = catalog.currency();
        let min = args
            .min_price
            .map_or(state.price_range.min, |p| Money::from_decimal(p, currency));
        let max = args
            .max_price
            .map_or(state.price_range.max, |p| Money::from_decimal(p, currency));
        state.set_price_range(PriceRange::new(min, max));
    }

    state.select_material(args.material.clone());

    let appearance = args
        .appearance
        .iter()
        .map(|a| Appearance::from_str(a).ok_or_else(|| anyhow!("Unknown appearance: {}", a)))
        .collect::<Result<Vec<_>>>()?;
    state.set_appearance(appearance);
    state.set_gems(args.gem.clone());
    state.select_size(args.size);

    if let Some(sort) = &args.sort {
        state.set_sort(SortOption::from_str(sort).ok_or_else(|| anyhow!("Unknown sort option: {}", sort))?);
    }
    state.set_page(args.page);

    Ok(state)
}

fn print_view(view: &CatalogView<'_>, ctx: &Context) {
    ctx.output.header(&format!(
        "{} ({} products)",
        view.category.display_name(),
        view.total
    ));
    ctx.output.kv("Sort", view.sort.display_name());
    ctx.output.kv(
        "Price",
        &format!("{} - {}", view.price_bounds.min.display(), view.price_bounds.max.display()),
    );

    if view.is_empty() {
        ctx.output.info("");
        ctx.output.info("No products match these filters.");
        return;
    }

    println!();
    let widths = [28, 26, 10, 16, 10];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "COLORS", "SIZES"], &widths);
    ctx.output.table_row(&["──", "────", "─────", "──────", "─────"], &widths);

    for product in &view.items {
        let sizes = if product.is_one_size() {
            "one size".to_string()
        } else {
            product
                .sizes
                .iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        let colors = product.colors.join(",");
        let price = product.price();
        ctx.output.table_row(
            &[
                &truncate(product.id.as_str(), 28),
                &truncate(&product.name, 26),
                &price,
                &truncate(&colors, 16),
                &truncate(&sizes, 10),
            ],
            &widths,
        );
    }

    let p = &view.pagination;
    println!();
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {} of {})",
        p.start_item(),
        p.end_item(),
        p.total,
        p.page,
        p.total_pages
    ));
}

fn print_facets(view: &CatalogView<'_>, ctx: &Context) {
    for facet in view.facets.iter() {
        if facet.values.is_empty() {
            continue;
        }
        ctx.output.header(facet.kind.display_name());
        for value in &facet.values {
            ctx.output.list_item(&format!(
                "{} {} ({})",
                selected_marker(value.selected),
                value.value,
                value.count
            ));
        }
    }
}
