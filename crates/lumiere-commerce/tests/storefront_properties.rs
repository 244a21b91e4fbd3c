//! Behavioral properties of the listing pipeline and the cart.

use chrono::NaiveDate;
use lumiere_commerce::prelude::*;

fn def(id: &str, category: Category, price: f64, day: u32) -> ProductDefinition {
    ProductDefinition {
        id: id.to_string(),
        category,
        price,
        created_at: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        best_seller: false,
        variants: vec![ColorVariant::new(
            "silver",
            vec![format!("/images/{id}-silver-1.webp")],
        )],
        has_gem: false,
        surface: Surface::Smooth,
        gemstones: vec![],
        sizes: vec![],
    }
}

/// 10 rings (4 with a gem, 3 of those in size 16), 13 earrings, 3 necklaces.
fn fixture() -> Catalog {
    let mut defs = Vec::new();

    for i in 0..10u32 {
        let mut ring = def(&format!("ring-{i}"), Category::Rings, 40.0 + f64::from(i), 1 + i);
        ring.sizes = vec![15, 17];
        if i < 4 {
            ring.has_gem = true;
            ring.gemstones = vec!["pearl".to_string()];
            if i < 3 {
                ring.sizes = vec![15, 16, 17];
            }
        } else if i == 9 {
            // Size 16 without a gem must not count towards with_gem.
            ring.sizes = vec![16];
        }
        ring.best_seller = i % 3 == 0;
        defs.push(ring);
    }

    for i in 0..13u32 {
        defs.push(def(&format!("earrings-{i}"), Category::Earrings, 30.0, 1));
    }

    let mut newest = def("necklace-newest", Category::Necklaces, 90.0, 28);
    newest.best_seller = true;
    defs.push(newest);
    defs.push(def("necklace-tied-a", Category::Necklaces, 60.0, 20));
    defs.push(def("necklace-tied-b", Category::Necklaces, 60.0, 20));

    Catalog::from_definitions(defs, Currency::EUR).unwrap()
}

fn ids(view: &CatalogView<'_>) -> Vec<String> {
    view.items.iter().map(|p| p.id.to_string()).collect()
}

fn all_matches(catalog: &Catalog, state: &FilterState) -> Vec<String> {
    let mut all = state.clone();
    all.set_page(1);
    let view = browse(catalog, &all, PageSize::new(1000));
    ids(&view)
}

#[test]
fn category_filter_yields_only_that_category() {
    let catalog = fixture();
    for category in Category::ALL {
        let state = FilterState::new(&catalog, category.into());
        let view = browse(&catalog, &state, PageSize::new(100));
        assert!(view.items.iter().all(|p| p.category == category));
        assert_eq!(
            view.total,
            catalog.products().iter().filter(|p| p.category == category).count()
        );
    }
}

#[test]
fn best_sellers_spans_categories() {
    let catalog = fixture();
    let state = FilterState::new(&catalog, CategoryFilter::BestSellers);
    let view = browse(&catalog, &state, PageSize::new(100));

    assert_eq!(
        ids(&view),
        vec!["ring-0", "ring-3", "ring-6", "ring-9", "necklace-newest"]
    );
    assert!(view.items.iter().all(|p| p.is_best_seller));
}

#[test]
fn new_collection_is_exactly_five_most_recent() {
    let catalog = fixture();
    let state = FilterState::new(&catalog, CategoryFilter::NewCollection);
    let view = browse(&catalog, &state, PageSize::new(100));

    // Ties on the creation date keep catalog order.
    assert_eq!(
        ids(&view),
        vec!["necklace-newest", "necklace-tied-a", "necklace-tied-b", "ring-9", "ring-8"]
    );
}

#[test]
fn pages_partition_the_filtered_products() {
    let catalog = fixture();
    for size in [1, 3, 8, 12] {
        let mut state = FilterState::new(&catalog, Category::Earrings.into());
        let first = browse(&catalog, &state, PageSize::new(size));

        let mut seen = Vec::new();
        for page in 1..=first.pagination.total_pages {
            state.set_page(page);
            let view = browse(&catalog, &state, PageSize::new(size));
            assert!(view.len() <= size);
            seen.extend(ids(&view));
        }

        assert_eq!(seen.len(), first.total);
        assert_eq!(seen, all_matches(&catalog, &state));
    }
}

#[test]
fn pagination_boundary_at_thirteen_items() {
    let catalog = fixture();
    let mut state = FilterState::new(&catalog, Category::Earrings.into());
    let page_size = PageSize::for_viewport(1280);

    let page1 = browse(&catalog, &state, page_size);
    assert_eq!(page1.total, 13);
    assert_eq!(page1.len(), 12);

    state.set_page(2);
    assert_eq!(browse(&catalog, &state, page_size).len(), 1);

    state.set_page(3);
    let clamped = browse(&catalog, &state, page_size);
    assert_eq!(clamped.pagination.page, 2);
    assert_eq!(clamped.len(), 1);
}

#[test]
fn category_change_resets_filters() {
    let catalog = fixture();
    let mut state = FilterState::new(&catalog, Category::Rings.into());
    state.select_material(Some("silver".into()));
    state.set_appearance(vec![Appearance::WithGem]);
    state.set_gems(vec!["pearl".into()]);
    state.select_size(Some(16));
    state.set_price_range(PriceRange::new(
        Money::new(4100, Currency::EUR),
        Money::new(4300, Currency::EUR),
    ));
    state.set_page(2);

    state.select_category(&catalog, Category::Necklaces.into());

    assert!(state.material.is_none());
    assert!(state.appearance.is_empty());
    assert!(state.gems.is_empty());
    assert!(state.size.is_none());
    assert_eq!(state.page, 1);
    assert_eq!(state.price_range.min.amount_cents, 6000);
    assert_eq!(state.price_range.max.amount_cents, 9000);
}

#[test]
fn facet_counts_follow_other_facets() {
    let catalog = fixture();
    let mut state = FilterState::new(&catalog, Category::Rings.into());

    let view = browse(&catalog, &state, PageSize::default());
    assert_eq!(view.total, 10);
    assert_eq!(view.facets.appearance.count_for("with_gem"), Some(4));
    assert_eq!(view.facets.appearance.count_for("without_gem"), Some(6));

    state.select_size(Some(16));
    let view = browse(&catalog, &state, PageSize::default());
    assert_eq!(view.facets.appearance.count_for("with_gem"), Some(3));
    assert_eq!(view.facets.size.count_for("16"), Some(4));
    assert_eq!(view.facets.size.count_for("15"), Some(9));
}

#[test]
fn double_add_merges_into_one_line() {
    let mut cart = CartStore::new();
    let item = LineItem::new("ring-0", "Ring 0", Money::new(4000, Currency::EUR), Category::Rings)
        .with_variant(Some("silver"), Some(16));

    cart.add_item(item.clone().with_quantity(1));
    cart.add_item(item.clone().with_quantity(2));

    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.get(&item.key).unwrap().quantity, 3);
}

#[test]
fn dec_at_one_removes_the_line() {
    let mut cart = CartStore::new();
    let item = LineItem::new("ring-0", "Ring 0", Money::new(4000, Currency::EUR), Category::Rings);
    let key = item.key.clone();
    cart.add_item(item);

    cart.dec(&key);
    assert!(cart.items().iter().all(|i| i.key != key));
}

#[test]
fn colliding_variant_update_collapses_lines() {
    let mut cart = CartStore::new();
    let base = LineItem::new("ring-0", "Ring 0", Money::new(4000, Currency::EUR), Category::Rings);
    let small = base.clone().with_variant(Some("silver"), Some(15)).with_quantity(2);
    let large = base.with_variant(Some("silver"), Some(16)).with_quantity(4);
    let small_key = small.key.clone();
    let large_key = large.key.clone();
    cart.add_item(small);
    cart.add_item(large);

    cart.update_variant(&small_key, VariantUpdate::size(16));

    let lines: Vec<_> = cart.items().iter().filter(|i| i.key == large_key).collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 6);
    assert_eq!(cart.line_count(), 1);
}

#[test]
fn subtotal_with_shipping_kit() {
    let mut cart = CartStore::new();
    cart.add_item(
        LineItem::new("ring-aurora", "Ring Aurora", Money::new(5800, Currency::EUR), Category::Rings)
            .with_quantity(2),
    );
    cart.add_item(
        LineItem::new(
            "personal-initial-pendant",
            "Personal Initial Pendant",
            Money::new(7000, Currency::EUR),
            Category::Personal,
        )
        .with_service_option("shipping-kit"),
    );

    let pricing = PricingRules::default().price(cart.items()).unwrap();
    assert_eq!(pricing.subtotal, Money::new(20100, Currency::EUR));
    assert_eq!(pricing.subtotal.display(), "\u{20ac}201.00");
}
