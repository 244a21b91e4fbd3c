//! Product categories and the category selector used by the listing page.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommerceError;

/// A literal product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Rings,
    Earrings,
    Necklaces,
    Bracelets,
    /// Personalised pieces; the only category with service options.
    Personal,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 5] = [
        Category::Rings,
        Category::Earrings,
        Category::Necklaces,
        Category::Bracelets,
        Category::Personal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rings => "rings",
            Category::Earrings => "earrings",
            Category::Necklaces => "necklaces",
            Category::Bracelets => "bracelets",
            Category::Personal => "personal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rings" => Some(Category::Rings),
            "earrings" => Some(Category::Earrings),
            "necklaces" => Some(Category::Necklaces),
            "bracelets" => Some(Category::Bracelets),
            "personal" => Some(Category::Personal),
            _ => None,
        }
    }

    /// Title shown in listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Rings => "Rings",
            Category::Earrings => "Earrings",
            Category::Necklaces => "Necklaces",
            Category::Bracelets => "Bracelets",
            Category::Personal => "Personal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of products in the `new-collection` pseudo-category.
pub const NEW_COLLECTION_SIZE: usize = 5;

/// What the listing page shows as its base subset.
///
/// Besides literal categories there are two pseudo-categories that
/// reinterpret the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    /// Exact category match.
    Category(Category),
    /// Every product flagged as a best seller.
    BestSellers,
    /// The [`NEW_COLLECTION_SIZE`] most recently created products.
    NewCollection,
}

impl CategoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::Category(c) => c.as_str(),
            CategoryFilter::BestSellers => "best-sellers",
            CategoryFilter::NewCollection => "new-collection",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "best-sellers" => Some(CategoryFilter::BestSellers),
            "new-collection" => Some(CategoryFilter::NewCollection),
            other => Category::from_str(other).map(CategoryFilter::Category),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryFilter::Category(c) => c.display_name(),
            CategoryFilter::BestSellers => "Best Sellers",
            CategoryFilter::NewCollection => "New Collection",
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::Category(Category::Rings)
    }
}

impl From<Category> for CategoryFilter {
    fn from(c: Category) -> Self {
        CategoryFilter::Category(c)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = CommerceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        CategoryFilter::from_str(&s).ok_or(CommerceError::UnknownCategory(s))
    }
}

impl From<CategoryFilter> for String {
    fn from(c: CategoryFilter) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for c in Category::ALL {
            assert_eq!(Category::from_str(c.as_str()), Some(c));
        }
        assert_eq!(Category::from_str("Rings"), Some(Category::Rings));
        assert_eq!(Category::from_str("watches"), None);
    }

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!(
            CategoryFilter::from_str("best-sellers"),
            Some(CategoryFilter::BestSellers)
        );
        assert_eq!(
            CategoryFilter::from_str("new-collection"),
            Some(CategoryFilter::NewCollection)
        );
        assert_eq!(
            CategoryFilter::from_str("necklaces"),
            Some(CategoryFilter::Category(Category::Necklaces))
        );
        assert_eq!(CategoryFilter::from_str("sale"), None);
    }

    #[test]
    fn test_category_filter_default_is_rings() {
        assert_eq!(CategoryFilter::default(), CategoryFilter::Category(Category::Rings));
    }

    #[test]
    fn test_category_filter_serde_as_slug() {
        let json = serde_json::to_string(&CategoryFilter::BestSellers).unwrap();
        assert_eq!(json, "\"best-sellers\"");

        let parsed: CategoryFilter = serde_json::from_str("\"earrings\"").unwrap();
        assert_eq!(parsed, CategoryFilter::Category(Category::Earrings));

        assert!(serde_json::from_str::<CategoryFilter>("\"watches\"").is_err());
    }
}
