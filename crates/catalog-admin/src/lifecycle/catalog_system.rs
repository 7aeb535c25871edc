use crate::actions::CatalogActions;
use crate::config::CatalogConfig;
use crate::revalidate::{Revalidator, ViewCache};
use crate::{category_actor, product_actor};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The runtime orchestrator for the catalog.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the category and product stores
/// - **Dependency Wiring**: the product store receives a category client as its context
/// - **Pipeline Assembly**: building [`CatalogActions`] over the running stores
pub struct CatalogSystem {
    actions: CatalogActions,
    product_handle: JoinHandle<()>,
    category_handle: JoinHandle<()>,
}

impl CatalogSystem {
    /// Spawns both store actors and wires the pipeline. Must be called inside a Tokio runtime.
    pub fn new(config: CatalogConfig, cache: Arc<dyn ViewCache>) -> Self {
        // 1. Create actors (no dependencies yet)
        let buffer = config.store_buffer.max(1);
        let (category_actor, category_client) = category_actor::new(buffer);
        let (product_actor, product_client) = product_actor::new(buffer);

        // 2. Start actors with injected context
        let category_handle = tokio::spawn(category_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(category_client.clone()));

        let revalidator = Revalidator::new(cache, config.revalidation);
        let actions = CatalogActions::new(category_client, product_client, revalidator);
        info!(store_buffer = buffer, "Catalog system started");

        Self {
            actions,
            product_handle,
            category_handle,
        }
    }

    pub fn actions(&self) -> &CatalogActions {
        &self.actions
    }

    /// Drops the system's clients and waits for both actors to exit.
    ///
    /// Returns an error if either actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog...");
        drop(self.actions);

        for (store, handle) in [
            ("product", self.product_handle),
            ("category", self.category_handle),
        ] {
            if let Err(e) = handle.await {
                error!(store, "Store task failed: {:?}", e);
                return Err(format!("{store} store task failed: {e:?}"));
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}
