//! [`ResourceEntity`] implementation for [`Category`].
//!
//! Categories have no dependencies (`Context = ()`) and opt into the store's unique-name
//! constraint, which backs up the pipeline's duplicate check under concurrency.

use super::CategoryError;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use async_trait::async_trait;
use store_actor::ResourceEntity;

#[async_trait]
impl ResourceEntity for Category {
    type Id = CategoryId;
    type Create = CategoryCreate;
    type Update = CategoryUpdate;
    type Context = ();
    type Error = CategoryError;

    const UNIQUE_NAME: bool = true;

    fn name(&self) -> &str {
        &self.name
    }

    fn from_create_params(id: CategoryId, params: CategoryCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.name))
    }

    async fn on_update(
        &mut self,
        update: CategoryUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        self.name = update.name;
        Ok(())
    }
}
