//! # Store Actor
//!
//! A generic, in-process resource store built on the Actor Model. Each resource type (Category,
//! Product, …) is owned by one [`ResourceActor`] running in its own Tokio task; callers talk to it
//! through a cloneable [`ResourceClient`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ResourceEntity`]) - the resource, its payloads, its lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - sequential request processing over owned state
//! 3. **Interface Layer** ([`ResourceClient`], [`StoreClient`]) - typed async operations
//!
//! ## Store Operations
//!
//! `create`, `get`, `find_by_name` (optionally case-insensitive, optionally excluding one id),
//! `list`, `update` and `delete`. Every failure is a tagged [`StoreError`]:
//!
//! - [`StoreError::NotFound`] - the id does not resolve to a stored entity
//! - [`StoreError::ConstraintViolated`] - the write would break the unique-name constraint
//! - [`StoreError::Entity`] - a lifecycle hook rejected the request with the entity's own error
//! - [`StoreError::Closed`] / [`StoreError::Dropped`] - the actor is gone
//!
//! ## Unique Names
//!
//! Entities with [`ResourceEntity::UNIQUE_NAME`] set are kept case-insensitively unique by the
//! actor itself. Since the actor handles one request at a time, two concurrent creates with the
//! same name cannot both succeed, whatever checks callers ran beforehand.
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run(context)` rather than `new()`, so stores can be created first
//! and wired afterwards (e.g. the product store receives a category client to check references).
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers requests from scripted expectations and records every call.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::{ResourceClient, StoreResult};
pub use client_trait::StoreClient;
pub use entity::{fold_name, ResourceEntity};
pub use error::{StoreError, UNIQUE_NAME_CONSTRAINT};
pub use message::{ResourceRequest, Response};
