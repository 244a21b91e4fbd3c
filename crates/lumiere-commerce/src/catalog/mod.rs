//! Product catalog module.
//!
//! Contains product records, categories, and the static catalog store.

mod category;
mod product;
mod store;

pub use category::{Category, CategoryFilter, NEW_COLLECTION_SIZE};
pub use product::{title_from_slug, ColorVariant, Product, ProductDefinition, Surface};
pub use store::Catalog;
