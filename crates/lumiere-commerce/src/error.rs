//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Store mutations never fail (they are no-ops on unknown keys); these errors
/// come from building the catalog and from money arithmetic.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalog definitions share an ID.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A product definition violates a catalog invariant.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: String, reason: String },

    /// Unknown category slug.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<lumiere_cache::CacheError> for CommerceError {
    fn from(e: lumiere_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
