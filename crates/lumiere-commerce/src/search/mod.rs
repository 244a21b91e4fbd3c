//! Search module.
//!
//! Contains the listing filter state, the filter/sort/paginate pipeline,
//! facet counting and pagination.

pub mod engine;
mod facets;
mod filter;
mod query;
mod results;

pub use engine::{browse, category_subset, filter_products, sort_products};
pub use facets::count_facets;
pub use filter::{Appearance, FacetKind, PriceRange};
pub use query::{FilterState, SortOption};
pub use results::{
    CatalogView, Facet, FacetCounts, FacetValue, PageSize, Pagination, DESKTOP_PAGE_SIZE,
    MOBILE_BREAKPOINT_PX, MOBILE_PAGE_SIZE,
};
