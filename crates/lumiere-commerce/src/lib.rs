//! Storefront domain types and logic for the Lumiere jewelry shop.
//!
//! This crate provides the client-side core of the storefront:
//!
//! - **Catalog**: Products, color variants, categories, the built-in catalog
//! - **Search**: Filter state, the filter/sort/paginate pipeline, facet counts
//! - **Cart**: Key-addressed line items, checkout pricing, the bag drawer
//! - **Favorites**: A persisted list of product IDs
//!
//! # Example
//!
//! ```rust
//! use lumiere_cache::MemoryStore;
//! use lumiere_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut shop = Storefront::new(catalog, ShopConfig::default(), MemoryStore::new());
//!
//! // Browse rings on a desktop viewport
//! let mut state = shop.initial_filter_state();
//! state.toggle_appearance(Appearance::WithGem);
//! let view = shop.browse(&state, 1280);
//! assert!(view.len() <= 12);
//!
//! // Add to the bag
//! shop.add_to_cart("ring-aurora", Some("silver"), Some(16), 2).unwrap();
//! assert!(shop.is_drawer_open());
//!
//! let summary = shop.checkout_summary().unwrap();
//! println!("Subtotal: {}", summary.subtotal.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod events;
pub mod favorites;
pub mod search;
pub mod storefront;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Catalog, Category, CategoryFilter, ColorVariant, Product, ProductDefinition, Surface,
    };

    // Search
    pub use crate::search::{
        browse, Appearance, CatalogView, FacetCounts, FacetKind, FilterState, PageSize,
        Pagination, PriceRange, SortOption,
    };

    // Cart
    pub use crate::cart::{
        BagDrawer, CartPricing, CartStore, LineItem, LinePricing, PricingRules, VariantUpdate,
    };

    // Stores
    pub use crate::config::ShopConfig;
    pub use crate::events::{CartEvent, DrawerEvent, FavoritesEvent, Observers, SubscriptionId};
    pub use crate::favorites::FavoritesStore;
    pub use crate::storefront::Storefront;
}
