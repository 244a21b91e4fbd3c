//! Listing results, facets and pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::{CategoryFilter, Product};
use crate::search::{FacetKind, PriceRange, SortOption};

/// Viewport width below which the compact page size applies.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;
/// Products per page on narrow viewports.
pub const MOBILE_PAGE_SIZE: usize = 8;
/// Products per page on wide viewports.
pub const DESKTOP_PAGE_SIZE: usize = 12;

/// Page size chosen by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize(usize);

impl PageSize {
    /// A fixed page size. Zero is raised to one.
    pub fn new(size: usize) -> Self {
        Self(size.max(1))
    }

    /// Page size for a viewport width using the default breakpoint.
    pub fn for_viewport(width_px: u32) -> Self {
        Self::for_viewport_with(width_px, MOBILE_BREAKPOINT_PX, MOBILE_PAGE_SIZE, DESKTOP_PAGE_SIZE)
    }

    /// Page size for a viewport width with explicit breakpoint and sizes.
    pub fn for_viewport_with(width_px: u32, breakpoint_px: u32, mobile: usize, desktop: usize) -> Self {
        if width_px < breakpoint_px {
            Self::new(mobile)
        } else {
            Self::new(desktop)
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DESKTOP_PAGE_SIZE)
    }
}

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed), after clamping.
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info, clamping `page` to `[1, total_pages]`.
    pub fn new(page: usize, per_page: PageSize, total: usize) -> Self {
        let per_page = per_page.get();
        let total_pages = total.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on the page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// The items of the current page.
    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.per_page).min(items.len());
        &items[start..end]
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Get start item number (1-indexed), 0 when empty.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, PageSize::default(), 0)
    }
}

/// Counts for every option of one facet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    pub kind: FacetKind,
    pub values: Vec<FacetValue>,
}

impl Facet {
    pub fn new(kind: FacetKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }

    /// Add a value to the facet.
    pub fn add_value(&mut self, value: impl Into<String>, count: usize, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    /// Count reported for an option.
    pub fn count_for(&self, value: &str) -> Option<usize> {
        self.values.iter().find(|v| v.value == value).map(|v| v.count)
    }
}

/// A single facet option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// Option value (color key, predicate, gem id or size).
    pub value: String,
    /// Products the listing would show if this option were the selection.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

/// Counts for all facets of the listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetCounts {
    pub material: Facet,
    pub appearance: Facet,
    pub gem: Facet,
    pub size: Facet,
}

impl FacetCounts {
    /// Facet by kind.
    pub fn get(&self, kind: FacetKind) -> &Facet {
        match kind {
            FacetKind::Material => &self.material,
            FacetKind::Appearance => &self.appearance,
            FacetKind::Gem => &self.gem,
            FacetKind::Size => &self.size,
        }
    }

    /// All facets in panel order.
    pub fn iter(&self) -> impl Iterator<Item = &Facet> {
        [&self.material, &self.appearance, &self.gem, &self.size].into_iter()
    }
}

/// Output of one listing run.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView<'a> {
    /// Category the view was computed for.
    pub category: CategoryFilter,
    /// Products on the current page.
    pub items: Vec<&'a Product>,
    /// Number of products matching every filter.
    pub total: usize,
    pub pagination: Pagination,
    pub facets: FacetCounts,
    /// Observed price bounds of the category subset (slider limits).
    pub price_bounds: PriceRange,
    pub sort: SortOption,
}

impl CatalogView<'_> {
    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Get number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
