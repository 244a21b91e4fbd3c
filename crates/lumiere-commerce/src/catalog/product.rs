//! Product records and the declarative definitions they are built from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Surface finish of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Smooth,
    Rough,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Smooth => "smooth",
            Surface::Rough => "rough",
        }
    }
}

/// Images for one color of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorVariant {
    /// Color key (e.g., "silver", "gold", "soft-blue").
    pub color: String,
    /// Image references; the first is the main image, the second the hover image.
    pub images: Vec<String>,
}

impl ColorVariant {
    pub fn new(color: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            color: color.into(),
            images,
        }
    }

    /// Main image for this color.
    pub fn main_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Hover image for this color, if one exists.
    pub fn hover_image(&self) -> Option<&str> {
        self.images.get(1).map(String::as_str)
    }
}

/// A product in the catalog.
///
/// Products are immutable once built. Use [`ProductDefinition::build`] to
/// construct one; it derives the display name, color list and thumbnail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product slug.
    pub id: ProductId,
    /// Display title derived from the slug.
    pub name: String,
    /// Product category.
    pub category: Category,
    /// Unit price.
    pub price_value: Money,
    /// Creation date, used for recency ordering.
    pub created_at: NaiveDate,
    /// Best-seller flag.
    pub is_best_seller: bool,
    /// Color keys in definition order. Never lists a color without images.
    pub colors: Vec<String>,
    /// Images per color, same order as `colors`.
    pub variants: Vec<ColorVariant>,
    /// Fallback image when no color is selected.
    pub thumbnail: String,
    /// Whether the piece is set with a stone.
    pub has_gem: bool,
    /// Surface finish.
    pub surface: Surface,
    /// Gem identifiers set in the piece.
    pub gemstones: Vec<String>,
    /// Available sizes; empty means one size.
    pub sizes: Vec<u16>,
}

impl Product {
    /// Display price (e.g., "€58.00").
    pub fn price(&self) -> String {
        self.price_value.display()
    }

    /// Check if the product comes in a color.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Check if the product comes in a size.
    pub fn has_size(&self, size: u16) -> bool {
        self.sizes.contains(&size)
    }

    /// Check if the product is one size only.
    pub fn is_one_size(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Check if any of the given gems is set in the product.
    pub fn has_any_gem(&self, gems: &[String]) -> bool {
        self.gemstones.iter().any(|g| gems.contains(g))
    }

    /// Images for a color.
    pub fn variant(&self, color: &str) -> Option<&ColorVariant> {
        self.variants.iter().find(|v| v.color == color)
    }

    /// Main image for a color, falling back to the thumbnail.
    pub fn main_image(&self, color: Option<&str>) -> &str {
        color
            .and_then(|c| self.variant(c))
            .and_then(ColorVariant::main_image)
            .unwrap_or(self.thumbnail.as_str())
    }

    /// Hover image for a color, if any.
    pub fn hover_image(&self, color: Option<&str>) -> Option<&str> {
        color
            .and_then(|c| self.variant(c))
            .and_then(ColorVariant::hover_image)
    }

    /// Every image reference of the product, deduplicated, in variant order.
    pub fn all_images(&self) -> Vec<&str> {
        let mut images: Vec<&str> = Vec::new();
        for image in self.variants.iter().flat_map(|v| v.images.iter()) {
            if !images.contains(&image.as_str()) {
                images.push(image.as_str());
            }
        }
        images
    }
}

/// Declarative product definition, as written in catalog data files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDefinition {
    /// Product slug.
    pub id: String,
    pub category: Category,
    /// Price in major currency units.
    pub price: f64,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub best_seller: bool,
    /// Images per color; colors with no images are dropped.
    pub variants: Vec<ColorVariant>,
    #[serde(default)]
    pub has_gem: bool,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub gemstones: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<u16>,
}

impl ProductDefinition {
    /// Build the immutable product.
    ///
    /// Fails if the slug is empty, the price is negative or not finite, or
    /// no color has at least one image.
    pub fn build(self, currency: Currency) -> Result<Product, CommerceError> {
        let invalid = |reason: &str| CommerceError::InvalidProduct {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("empty id"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(invalid("price must be a non-negative number"));
        }

        let variants: Vec<ColorVariant> = self
            .variants
            .iter()
            .filter(|v| !v.images.is_empty())
            .cloned()
            .collect();
        let thumbnail = variants
            .first()
            .and_then(ColorVariant::main_image)
            .map(str::to_string)
            .ok_or_else(|| invalid("no color variant has images"))?;
        let colors = variants.iter().map(|v| v.color.clone()).collect();

        Ok(Product {
            name: title_from_slug(&self.id),
            id: ProductId::new(self.id),
            category: self.category,
            price_value: Money::from_decimal(self.price, currency),
            created_at: self.created_at,
            is_best_seller: self.best_seller,
            colors,
            variants,
            thumbnail,
            has_gem: self.has_gem,
            surface: self.surface,
            gemstones: self.gemstones,
            sizes: self.sizes,
        })
    }
}

/// Title-case a hyphenated slug: `ring-aurora` becomes `Ring Aurora`.
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
