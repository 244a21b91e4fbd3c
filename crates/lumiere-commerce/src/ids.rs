//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a cart line key where a product slug is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the ID is the empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Product slug, e.g. `ring-aurora`.
    ProductId
);
define_id!(
    /// Composite cart line identity: `product|color|size`.
    LineKey
);

/// Color assumed when a line item has no explicit color.
pub const DEFAULT_COLOR: &str = "silver";

/// Size segment used in keys for one-size products.
pub const NO_SIZE: &str = "nosize";

impl LineKey {
    /// Derive the key for a product/color/size combination.
    ///
    /// A missing color defaults to [`DEFAULT_COLOR`], a missing size to
    /// [`NO_SIZE`]. An empty product ID yields an empty key.
    pub fn derive(product_id: &ProductId, color: Option<&str>, size: Option<u16>) -> Self {
        if product_id.is_empty() {
            return Self(String::new());
        }
        let color = color.filter(|c| !c.is_empty()).unwrap_or(DEFAULT_COLOR);
        let size = size.map_or_else(|| NO_SIZE.to_string(), |s| s.to_string());
        Self(format!("{}|{}|{}", product_id, color, size))
    }
}
