//! # Product Actor
//!
//! The Product store. Product names are not unique; instead every write is checked against the
//! category store, which the actor receives as its context.
//!
//! ## Structure
//!
//! - [`entity`] - [`ResourceEntity`](store_actor::ResourceEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let (category_actor, category_client) = category_actor::new(32);
//! let (product_actor, product_client) = product_actor::new(32);
//!
//! tokio::spawn(category_actor.run(()));
//! tokio::spawn(product_actor.run(category_client.clone()));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::{Product, ProductId};
use store_actor::ResourceActor;

/// Creates a new Product actor and its client. Ids are random v4 UUIDs.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, ProductId::generate);
    (actor, ProductClient::new(generic_client))
}
