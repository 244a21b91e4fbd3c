//! The listing pipeline: category, filters, sort, page.
//!
//! Everything here is a pure function of the catalog and the filter state.
//! Stages run in a fixed order:
//!
//! 1. category subset
//! 2. inclusive price range
//! 3. material
//! 4. appearance predicates (AND)
//! 5. gemstones (OR)
//! 6. size
//! 7. sort
//! 8. paginate

use crate::catalog::{Catalog, CategoryFilter, Product, NEW_COLLECTION_SIZE};
use crate::search::facets::count_facets;
use crate::search::{CatalogView, FilterState, PageSize, Pagination, PriceRange, SortOption};

/// Stage 1: the products a category shows before any filter.
///
/// `new-collection` is the most recent products by creation date; ties
/// keep catalog order.
pub fn category_subset(catalog: &Catalog, category: CategoryFilter) -> Vec<&Product> {
    match category {
        CategoryFilter::Category(c) => catalog
            .products()
            .iter()
            .filter(|p| p.category == c)
            .collect(),
        CategoryFilter::BestSellers => catalog
            .products()
            .iter()
            .filter(|p| p.is_best_seller)
            .collect(),
        CategoryFilter::NewCollection => {
            let mut recent: Vec<&Product> = catalog.products().iter().collect();
            recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            recent.truncate(NEW_COLLECTION_SIZE);
            recent
        }
    }
}

/// Stages 2 to 6 for a single product.
pub fn matches_filters(product: &Product, state: &FilterState) -> bool {
    if !state.price_range.contains(&product.price_value) {
        return false;
    }
    if let Some(material) = &state.material {
        if !product.has_color(material) {
            return false;
        }
    }
    if !state.appearance.iter().all(|a| a.matches(product)) {
        return false;
    }
    if !state.gems.is_empty() && !product.has_any_gem(&state.gems) {
        return false;
    }
    if let Some(size) = state.size {
        if !product.has_size(size) {
            return false;
        }
    }
    true
}

/// Stages 1 to 6: every product the state selects, unsorted.
pub fn filter_products<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a Product> {
    category_subset(catalog, state.category)
        .into_iter()
        .filter(|p| matches_filters(p, state))
        .collect()
}

/// Stage 7. Stable, so equal prices keep their pipeline order.
///
/// Only the price options reorder; the others pass the input through.
pub fn sort_products(products: &mut [&Product], sort: SortOption) {
    match sort {
        SortOption::PriceAsc => products.sort_by_key(|p| p.price_value.amount_cents),
        SortOption::PriceDesc => {
            products.sort_by(|a, b| b.price_value.amount_cents.cmp(&a.price_value.amount_cents))
        }
        SortOption::BestSelling | SortOption::DateAsc | SortOption::DateDesc => {}
    }
}

/// Run the whole pipeline and compute facet counts.
///
/// Never fails; an empty result is an empty view with one page.
pub fn browse<'a>(catalog: &'a Catalog, state: &FilterState, page_size: PageSize) -> CatalogView<'a> {
    let subset = category_subset(catalog, state.category);
    let price_bounds = PriceRange::bounds_of(subset.iter().copied(), catalog.currency());

    let mut matched: Vec<&Product> = subset
        .iter()
        .copied()
        .filter(|p| matches_filters(p, state))
        .collect();
    sort_products(&mut matched, state.sort);

    let pagination = Pagination::new(state.page, page_size, matched.len());
    let items = pagination.slice(&matched).to_vec();
    let facets = count_facets(&subset, state);

    tracing::debug!(
        category = %state.category,
        total = matched.len(),
        page = pagination.page,
        total_pages = pagination.total_pages,
        "catalog listing computed"
    );

    CatalogView {
        category: state.category,
        items,
        total: matched.len(),
        pagination,
        facets,
        price_bounds,
        sort: state.sort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::money::Money;
    use crate::search::Appearance;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_category_subset_exact_match() {
        let catalog = Catalog::builtin().unwrap();
        let rings = category_subset(&catalog, Category::Rings.into());
        assert!(!rings.is_empty());
        assert!(rings.iter().all(|p| p.category == Category::Rings));
    }

    #[test]
    fn test_best_sellers_subset() {
        let catalog = Catalog::builtin().unwrap();
        let best = category_subset(&catalog, CategoryFilter::BestSellers);
        let expected = catalog.products().iter().filter(|p| p.is_best_seller).count();
        assert_eq!(best.len(), expected);
        assert!(best.iter().all(|p| p.is_best_seller));
    }

    #[test]
    fn test_new_collection_is_five_most_recent() {
        let catalog = Catalog::builtin().unwrap();
        let recent = category_subset(&catalog, CategoryFilter::NewCollection);
        assert_eq!(
            ids(&recent),
            vec![
                "necklace-ember-lariat",
                "personal-fingerprint-disc",
                "ring-dewdrop",
                "earrings-dewdrop",
                "necklace-pearl-drop",
            ]
        );
    }

    #[test]
    fn test_price_sort_is_stable() {
        let catalog = Catalog::builtin().unwrap();
        let mut rings = category_subset(&catalog, Category::Rings.into());
        sort_products(&mut rings, SortOption::PriceAsc);
        let prices: Vec<i64> = rings.iter().map(|p| p.price_value.amount_cents).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));

        sort_products(&mut rings, SortOption::PriceDesc);
        let prices: Vec<i64> = rings.iter().map(|p| p.price_value.amount_cents).collect();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_non_price_sorts_pass_through() {
        let catalog = Catalog::builtin().unwrap();
        let original = category_subset(&catalog, Category::Rings.into());
        for sort in [SortOption::BestSelling, SortOption::DateAsc, SortOption::DateDesc] {
            let mut sorted = original.clone();
            sort_products(&mut sorted, sort);
            assert_eq!(ids(&sorted), ids(&original));
        }
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = FilterState::new(&catalog, Category::Rings.into());
        state.set_price_range(PriceRange::new(
            Money::new(4600, catalog.currency()),
            Money::new(5800, catalog.currency()),
        ));
        let matched = filter_products(&catalog, &state);
        let found = ids(&matched);
        assert!(found.contains(&"ring-tide".to_string()));
        assert!(found.contains(&"ring-aurora".to_string()));
        assert!(matched.iter().all(|p| {
            p.price_value.amount_cents >= 4600 && p.price_value.amount_cents <= 5800
        }));
    }

    #[test]
    fn test_conflicting_appearance_yields_nothing() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = FilterState::new(&catalog, Category::Rings.into());
        state.toggle_appearance(Appearance::WithGem);
        state.toggle_appearance(Appearance::WithoutGem);
        let view = browse(&catalog, &state, PageSize::default());
        assert!(view.is_empty());
        assert_eq!(view.pagination.total_pages, 1);
    }

    #[test]
    fn test_browse_paginates() {
        let catalog = Catalog::builtin().unwrap();
        let state = FilterState::new(&catalog, Category::Rings.into());
        let view = browse(&catalog, &state, PageSize::new(3));
        assert_eq!(view.len(), 3);
        assert_eq!(view.total, category_subset(&catalog, Category::Rings.into()).len());
        assert!(view.pagination.has_next);
    }
}
