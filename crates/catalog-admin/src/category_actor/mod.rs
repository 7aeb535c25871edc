//! # Category Actor
//!
//! The Category store: a [`ResourceActor`] over [`Category`] with case-insensitive unique names.
//!
//! ## Structure
//!
//! - [`entity`] - [`ResourceEntity`](store_actor::ResourceEntity) implementation for [`Category`]
//! - [`error`] - [`CategoryError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use catalog_admin::category_actor;
//! use catalog_admin::model::CategoryCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = category_actor::new(32);
//!
//!     // No dependencies, so context is ()
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create_category(CategoryCreate { name: "Drinks".into() }).await?;
//!     println!("created {id}");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CategoryClient;
use crate::model::{Category, CategoryId};
use store_actor::ResourceActor;

/// Creates a new Category actor and its client. Ids are random v4 UUIDs.
pub fn new(buffer_size: usize) -> (ResourceActor<Category>, CategoryClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, CategoryId::generate);
    (actor, CategoryClient::new(generic_client))
}
