//! Error types for the Product store.

use crate::model::CategoryId;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product references a category that does not exist.
    #[error("Category {0} does not exist")]
    UnknownCategory(CategoryId),

    /// The category store could not answer the reference check.
    #[error("Category lookup failed: {0}")]
    CategoryLookup(String),

    /// The product store could not be reached.
    #[error("Product store error: {0}")]
    Store(String),
}
