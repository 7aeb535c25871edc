//! Error types for the Category store.

use thiserror::Error;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    /// The requested category was not found.
    #[error("Category not found: {0}")]
    NotFound(String),

    /// Another category already uses this name, ignoring case.
    #[error("Category \"{0}\" already exists")]
    DuplicateName(String),

    /// The category store could not be reached.
    #[error("Category store error: {0}")]
    Store(String),
}
