//! [`ResourceEntity`] implementation for [`Product`].
//!
//! The product store runs with a [`CategoryClient`] as its context. Both `on_create` and
//! `on_update` confirm that the referenced category is live before the write is committed.

use super::ProductError;
use crate::clients::CategoryClient;
use crate::model::{CategoryId, Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use store_actor::{ResourceEntity, StoreClient};
use tracing::debug;

async fn ensure_category(categories: &CategoryClient, id: CategoryId) -> Result<(), ProductError> {
    match categories.get(id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => {
            debug!(category_id = %id, "Referenced category missing");
            Err(ProductError::UnknownCategory(id))
        }
        Err(e) => Err(ProductError::CategoryLookup(e.to_string())),
    }
}

#[async_trait]
impl ResourceEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Context = CategoryClient;
    type Error = ProductError;

    fn name(&self) -> &str {
        &self.name
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.fields, params.image))
    }

    async fn on_create(&mut self, categories: &CategoryClient) -> Result<(), Self::Error> {
        ensure_category(categories, self.category_id).await
    }

    async fn on_update(
        &mut self,
        update: ProductUpdate,
        categories: &CategoryClient,
    ) -> Result<(), Self::Error> {
        ensure_category(categories, update.fields.category_id).await?;
        self.apply(update.fields, update.image);
        Ok(())
    }
}
