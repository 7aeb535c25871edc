//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the catalog's store actors.
//!
//! ## The CatalogSystem Pattern
//!
//! ```rust,ignore
//! let system = CatalogSystem::new(CatalogConfig::default(), Arc::new(MemoryViewCache::new()));
//!
//! let response = system.actions().add_category(None, &form).await;
//!
//! system.shutdown().await?;
//! ```
//!
//! ## Dependency Injection via Context
//!
//! Actors are created first and receive their dependencies in `run(context)`:
//!
//! ```rust,ignore
//! // No dependencies
//! impl ResourceEntity for Category {
//!     type Context = ();
//! }
//!
//! // Checks category references on every write
//! impl ResourceEntity for Product {
//!     type Context = CategoryClient;
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of each channel
//! 2. **Product actor exits** - it holds a category client, so it must finish first
//! 3. **Category actor exits** - its last sender went away with the product actor
//!
//! Clones of [`CatalogActions`](crate::actions::CatalogActions) handed out to callers keep the
//! stores alive; `shutdown` waits until they are dropped too.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber; see [`store_actor::tracing`].

pub mod catalog_system;

pub use catalog_system::*;
pub use store_actor::tracing::setup_tracing;
