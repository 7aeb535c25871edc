//! # Store Errors
//!
//! Every failure a store operation can produce is a variant of [`StoreError`].
//! Callers match on the variant; nothing downstream inspects error messages.

/// Errors that can occur within the resource store.
///
/// `E` is the entity's own error type (see [`ResourceEntity::Error`](crate::ResourceEntity::Error)),
/// carried unchanged when a lifecycle hook rejects a request.
#[derive(Debug, thiserror::Error)]
pub enum StoreError<E> {
    #[error("Store actor closed")]
    Closed,
    #[error("Store actor dropped response channel")]
    Dropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Constraint {constraint} violated by {value:?}")]
    ConstraintViolated {
        constraint: &'static str,
        value: String,
    },
    #[error("Entity rejected request: {0}")]
    Entity(E),
}

/// Name of the unique, case-insensitive name constraint.
pub const UNIQUE_NAME_CONSTRAINT: &str = "unique_name";
