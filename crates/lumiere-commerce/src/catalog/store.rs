//! The immutable in-memory catalog.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{Category, Product, ProductDefinition};
use crate::error::CommerceError;
use crate::money::Currency;

/// Catalog data shipped with the storefront.
const BUILTIN_CATALOG: &str = include_str!("builtin.json");

/// Static, immutable list of products, built once at startup.
///
/// Product order is the definition order; it is the tie-breaker for every
/// stable ordering the listing engine performs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    currency: Currency,
}

impl Catalog {
    /// Build a catalog from declarative definitions.
    ///
    /// Fails on the first invalid definition or on a duplicate product ID.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ProductDefinition>,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        let mut products = Vec::new();

        for definition in definitions {
            let product = definition.build(currency)?;
            if !seen.insert(product.id.clone()) {
                return Err(CommerceError::DuplicateProduct(product.id.into_inner()));
            }
            products.push(product);
        }

        tracing::debug!(products = products.len(), %currency, "catalog built");
        Ok(Self { products, currency })
    }

    /// Build a catalog from a JSON array of definitions.
    pub fn from_json(json: &str, currency: Currency) -> Result<Self, CommerceError> {
        let definitions: Vec<ProductDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions, currency)
    }

    /// The catalog bundled with the crate, priced in euros.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json(BUILTIN_CATALOG, Currency::EUR)
    }

    /// All products in definition order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Look up a product by slug.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Look up a product by slug, failing if it does not exist.
    pub fn require(&self, id: &str) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product count per literal category, in menu order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|c| (*c, self.products.iter().filter(|p| p.category == *c).count()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColorVariant;
    use chrono::NaiveDate;

    fn definition(id: &str) -> ProductDefinition {
        ProductDefinition {
            id: id.to_string(),
            category: Category::Earrings,
            price: 42.0,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            best_seller: false,
            variants: vec![ColorVariant::new("silver", vec!["a.jpg".into()])],
            has_gem: false,
            surface: Default::default(),
            gemstones: vec![],
            sizes: vec![],
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.currency(), Currency::EUR);

        for product in catalog.products() {
            assert!(!product.colors.is_empty(), "{} has no colors", product.id);
            assert!(!product.thumbnail.is_empty());
            for color in &product.colors {
                assert!(!product.variant(color).unwrap().images.is_empty());
            }
        }
    }

    #[test]
    fn test_builtin_drops_empty_variants() {
        let catalog = Catalog::builtin().unwrap();
        let pebble = catalog.get("ring-pebble").unwrap();
        assert_eq!(pebble.colors, vec!["silver"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::from_definitions(
            vec![definition("earrings-a"), definition("earrings-a")],
            Currency::EUR,
        )
        .unwrap_err();
        assert!(matches!(err, CommerceError::DuplicateProduct(id) if id == "earrings-a"));
    }

    #[test]
    fn test_require_unknown_product() {
        let catalog = Catalog::from_definitions(vec![definition("earrings-a")], Currency::EUR).unwrap();
        assert!(catalog.require("earrings-a").is_ok());
        assert!(matches!(
            catalog.require("earrings-b"),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_category_counts_cover_every_category() {
        let catalog = Catalog::builtin().unwrap();
        let counts = catalog.category_counts();
        assert_eq!(counts.len(), Category::ALL.len());
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), catalog.len());
    }
}
