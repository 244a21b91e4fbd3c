//! Filter predicates for the listing pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{Product, Surface};
use crate::money::{Currency, Money};

/// Appearance predicates. Selected predicates combine with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    WithGem,
    WithoutGem,
    Rough,
    Smooth,
}

impl Appearance {
    /// Every predicate, in the order the filter panel lists them.
    pub const ALL: [Appearance; 4] = [
        Appearance::WithGem,
        Appearance::WithoutGem,
        Appearance::Rough,
        Appearance::Smooth,
    ];

    /// Check the predicate against a product.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Appearance::WithGem => product.has_gem,
            Appearance::WithoutGem => !product.has_gem,
            Appearance::Rough => product.surface == Surface::Rough,
            Appearance::Smooth => product.surface == Surface::Smooth,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Appearance::WithGem => "with_gem",
            Appearance::WithoutGem => "without_gem",
            Appearance::Rough => "rough",
            Appearance::Smooth => "smooth",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "with_gem" => Some(Appearance::WithGem),
            "without_gem" => Some(Appearance::WithoutGem),
            "rough" => Some(Appearance::Rough),
            "smooth" => Some(Appearance::Smooth),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Appearance::WithGem => "With gemstone",
            Appearance::WithoutGem => "Without gemstone",
            Appearance::Rough => "Rough",
            Appearance::Smooth => "Smooth",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub fn new(min: Money, max: Money) -> Self {
        Self { min, max }
    }

    /// Observed min/max price of a set of products.
    ///
    /// An empty set yields a zero-width range at zero.
    pub fn bounds_of<'a>(products: impl IntoIterator<Item = &'a Product>, currency: Currency) -> Self {
        let mut bounds: Option<(i64, i64)> = None;
        for product in products {
            let cents = product.price_value.amount_cents;
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(cents), hi.max(cents)),
                None => (cents, cents),
            });
        }
        let (lo, hi) = bounds.unwrap_or((0, 0));
        Self::new(Money::new(lo, currency), Money::new(hi, currency))
    }

    /// Check whether a price lies inside the range, bounds included.
    pub fn contains(&self, price: &Money) -> bool {
        price.amount_cents >= self.min.amount_cents && price.amount_cents <= self.max.amount_cents
    }
}

/// The filter facets that report per-option counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    Material,
    Appearance,
    Gem,
    Size,
}

impl FacetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetKind::Material => "material",
            FacetKind::Appearance => "appearance",
            FacetKind::Gem => "gem",
            FacetKind::Size => "size",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FacetKind::Material => "Material",
            FacetKind::Appearance => "Appearance",
            FacetKind::Gem => "Gemstone",
            FacetKind::Size => "Size",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ColorVariant, ProductDefinition};
    use chrono::NaiveDate;

    fn product(price: f64, has_gem: bool, surface: Surface) -> Product {
        ProductDefinition {
            id: "ring-x".to_string(),
            category: Category::Rings,
            price,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            best_seller: false,
            variants: vec![ColorVariant::new("silver", vec!["x.jpg".into()])],
            has_gem,
            surface,
            gemstones: vec![],
            sizes: vec![],
        }
        .build(Currency::EUR)
        .unwrap()
    }

    #[test]
    fn test_appearance_predicates() {
        let gem_rough = product(10.0, true, Surface::Rough);
        assert!(Appearance::WithGem.matches(&gem_rough));
        assert!(!Appearance::WithoutGem.matches(&gem_rough));
        assert!(Appearance::Rough.matches(&gem_rough));
        assert!(!Appearance::Smooth.matches(&gem_rough));
    }

    #[test]
    fn test_appearance_parsing() {
        for a in Appearance::ALL {
            assert_eq!(Appearance::from_str(a.as_str()), Some(a));
        }
        assert_eq!(Appearance::from_str("sparkly"), None);
    }

    #[test]
    fn test_price_bounds_and_inclusive_contains() {
        let products = [
            product(58.0, false, Surface::Smooth),
            product(39.0, false, Surface::Smooth),
            product(128.0, false, Surface::Smooth),
        ];
        let range = PriceRange::bounds_of(products.iter(), Currency::EUR);
        assert_eq!(range.min.amount_cents, 3900);
        assert_eq!(range.max.amount_cents, 12800);

        assert!(range.contains(&Money::new(3900, Currency::EUR)));
        assert!(range.contains(&Money::new(12800, Currency::EUR)));
        assert!(!range.contains(&Money::new(12801, Currency::EUR)));
    }

    #[test]
    fn test_price_bounds_of_nothing() {
        let range = PriceRange::bounds_of(std::iter::empty(), Currency::EUR);
        assert!(range.min.is_zero() && range.max.is_zero());
    }
}
