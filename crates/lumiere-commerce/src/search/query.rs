//! Listing filter state and sort options.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CategoryFilter};
use crate::search::engine::category_subset;
use crate::search::{Appearance, PriceRange};

/// Sort options offered on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Best selling first. Currently leaves pipeline order unchanged.
    #[default]
    BestSelling,
    /// Oldest first. Currently leaves pipeline order unchanged.
    DateAsc,
    /// Newest first. Currently leaves pipeline order unchanged.
    DateDesc,
}

impl SortOption {
    /// Every option, in menu order.
    pub const ALL: [SortOption; 5] = [
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::BestSelling,
        SortOption::DateAsc,
        SortOption::DateDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::BestSelling => "best_selling",
            SortOption::DateAsc => "date_asc",
            SortOption::DateDesc => "date_desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "price_asc" => Some(SortOption::PriceAsc),
            "price_desc" => Some(SortOption::PriceDesc),
            "best_selling" => Some(SortOption::BestSelling),
            "date_asc" => Some(SortOption::DateAsc),
            "date_desc" => Some(SortOption::DateDesc),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::BestSelling => "Best Selling",
            SortOption::DateAsc => "Oldest",
            SortOption::DateDesc => "Newest",
        }
    }

    /// Whether the engine applies a comparator for this option.
    pub fn is_applied(&self) -> bool {
        matches!(self, SortOption::PriceAsc | SortOption::PriceDesc)
    }
}

/// Everything the listing page has selected.
///
/// Mutators keep the page-reset rules: changing the category clears every
/// facet and resets the price range to the new subset's bounds; any other
/// filter or sort change sends the user back to page 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    pub material: Option<String>,
    pub appearance: Vec<Appearance>,
    pub gems: Vec<String>,
    pub size: Option<u16>,
    pub sort: SortOption,
    /// Requested page (1-indexed). Clamped by the engine.
    pub page: usize,
}

impl FilterState {
    /// Fresh state for a category, price range spanning the category.
    pub fn new(catalog: &Catalog, category: CategoryFilter) -> Self {
        Self {
            category,
            price_range: category_bounds(catalog, category),
            material: None,
            appearance: Vec::new(),
            gems: Vec::new(),
            size: None,
            sort: SortOption::default(),
            page: 1,
        }
    }

    /// Switch category. Resets facets, price range and page.
    pub fn select_category(&mut self, catalog: &Catalog, category: CategoryFilter) {
        let sort = self.sort;
        *self = Self::new(catalog, category);
        self.sort = sort;
    }

    /// Clear every facet and the price range, keeping category and sort.
    pub fn clear_filters(&mut self, catalog: &Catalog) {
        self.select_category(catalog, self.category);
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.price_range = range;
        self.page = 1;
    }

    pub fn select_material(&mut self, material: Option<String>) {
        self.material = material;
        self.page = 1;
    }

    /// Add the predicate if absent, remove it otherwise.
    pub fn toggle_appearance(&mut self, appearance: Appearance) {
        toggle(&mut self.appearance, appearance);
        self.page = 1;
    }

    pub fn set_appearance(&mut self, appearance: Vec<Appearance>) {
        self.appearance.clear();
        for a in appearance {
            if !self.appearance.contains(&a) {
                self.appearance.push(a);
            }
        }
        self.page = 1;
    }

    /// Add the gem if absent, remove it otherwise.
    pub fn toggle_gem(&mut self, gem: impl Into<String>) {
        toggle(&mut self.gems, gem.into());
        self.page = 1;
    }

    pub fn set_gems(&mut self, gems: Vec<String>) {
        self.gems = gems;
        self.page = 1;
    }

    pub fn select_size(&mut self, size: Option<u16>) {
        self.size = size;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.page = 1;
    }

    /// Request a page. Values below 1 are stored as 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Check if any facet or a narrowed price range is active.
    pub fn has_active_filters(&self, catalog: &Catalog) -> bool {
        self.material.is_some()
            || !self.appearance.is_empty()
            || !self.gems.is_empty()
            || self.size.is_some()
            || self.price_range != category_bounds(catalog, self.category)
    }
}

fn category_bounds(catalog: &Catalog, category: CategoryFilter) -> PriceRange {
    PriceRange::bounds_of(category_subset(catalog, category), catalog.currency())
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}
