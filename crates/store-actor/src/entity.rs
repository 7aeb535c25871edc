//! # ResourceEntity Trait
//!
//! The `ResourceEntity` trait defines the contract every stored resource (Category, Product, …)
//! implements to be managed by the generic `ResourceActor`. It specifies associated types for
//! IDs, create/update payloads, the injected context and the entity's own error type, and provides
//! lifecycle hooks (`on_create`, `on_update`, `on_delete`).
//!
//! # Associated Types
//! A `Category` entity requires a `CategoryCreate` payload, and you can't accidentally send it
//! a `ProductCreate` payload. The compiler rejects it.
//!
//! # Provided Methods (Hooks)
//! - [`ResourceEntity::on_create`]
//! - [`ResourceEntity::on_delete`]
//!
//! You do **not** need to implement these unless you want to customize behavior.
//! The default implementation does nothing (`Ok(())`).
//!
//! # Name Constraint
//! Every resource is named. Setting [`ResourceEntity::UNIQUE_NAME`] makes the store reject any
//! create or update that would leave two entities whose names are equal ignoring case.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored resource must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can consult other stores. The `Context` type is injected into every
/// hook when the actor starts (passing clients to `run()` instead of `new()`).
#[async_trait]
pub trait ResourceEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per resource rather than one per operation; callers of a given store deal with
    /// a single type when matching on [`StoreError::Entity`](crate::StoreError::Entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// When `true` the store enforces case-insensitive name uniqueness.
    const UNIQUE_NAME: bool = false;

    /// The entity's display name, used by name lookups and the unique-name constraint.
    fn name(&self) -> &str;

    /// Construct the full entity from the generated ID and the payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    /// Use this hook to check references held by other stores.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    ///
    /// Runs against a copy of the stored entity; the store only commits the copy when this
    /// hook and the name constraint both succeed.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Normalizes a name for case-insensitive comparison.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}
