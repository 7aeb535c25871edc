//! # Mutation Executor
//!
//! Performs the writes once input has been validated. Store failures arrive as typed resource
//! errors and leave here as a [`MutationError`]; nothing inspects error text.
//!
//! Deletes re-read the resource first. An id that no longer resolves yields
//! [`MutationError::NotFound`] and the store's delete is never sent. A category that products
//! still reference is not deleted at all ([`MutationError::InUse`]).

use crate::category_actor::CategoryError;
use crate::clients::{CategoryClient, ProductClient};
use crate::model::{
    Category, CategoryCreate, CategoryId, CategoryUpdate, Product, ProductCreate, ProductId,
    ProductUpdate,
};
use crate::product_actor::ProductError;
use store_actor::StoreClient;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MutationError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Name \"{name}\" is already taken")]
    Conflict { name: String },

    #[error("Category {0} does not exist")]
    UnknownCategory(CategoryId),

    #[error("Category \"{name}\" still has {count} product(s)")]
    InUse { name: String, count: usize },

    #[error("{0}")]
    Unexpected(String),
}

impl From<CategoryError> for MutationError {
    fn from(e: CategoryError) -> Self {
        match e {
            CategoryError::NotFound(id) => MutationError::NotFound(id),
            CategoryError::DuplicateName(name) => MutationError::Conflict { name },
            CategoryError::Store(msg) => MutationError::Unexpected(msg),
        }
    }
}

impl From<ProductError> for MutationError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => MutationError::NotFound(id),
            ProductError::UnknownCategory(id) => MutationError::UnknownCategory(id),
            e @ (ProductError::CategoryLookup(_) | ProductError::Store(_)) => {
                MutationError::Unexpected(e.to_string())
            }
        }
    }
}

/// Writes against the category and product stores.
#[derive(Clone)]
pub struct MutationExecutor {
    categories: CategoryClient,
    products: ProductClient,
}

impl MutationExecutor {
    pub fn new(categories: CategoryClient, products: ProductClient) -> Self {
        Self {
            categories,
            products,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_category(&self, name: String) -> Result<CategoryId, MutationError> {
        let id = self
            .categories
            .create_category(CategoryCreate { name })
            .await?;
        info!(%id, "Category created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_category(&self, id: CategoryId, name: String) -> Result<(), MutationError> {
        self.categories
            .update_category(id, CategoryUpdate { name })
            .await?;
        info!(%id, "Category updated");
        Ok(())
    }

    /// Deletes a category nothing refers to. Returns the removed category.
    ///
    /// The product count and the delete go to different actors, so a product created between
    /// the two can still point at the removed category.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<Category, MutationError> {
        let Some(category) = self.categories.get(id).await? else {
            warn!(%id, "Category vanished before delete");
            return Err(MutationError::NotFound(id.to_string()));
        };

        let count = self.products.count_in_category(id).await?;
        if count > 0 {
            warn!(%id, count, "Category still referenced");
            return Err(MutationError::InUse {
                name: category.name,
                count,
            });
        }

        self.categories.delete(id).await?;
        info!(%id, "Category deleted");
        Ok(category)
    }

    #[instrument(skip(self, params), fields(name = %params.fields.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, MutationError> {
        let id = self.products.create_product(params).await?;
        info!(%id, "Product created");
        Ok(id)
    }

    #[instrument(skip(self, update), fields(name = %update.fields.name))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, MutationError> {
        let product = self.products.update_product(id, update).await?;
        info!(%id, "Product updated");
        Ok(product)
    }

    /// Returns the removed product.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<Product, MutationError> {
        let Some(product) = self.products.get(id).await? else {
            warn!(%id, "Product vanished before delete");
            return Err(MutationError::NotFound(id.to_string()));
        };
        self.products.delete(id).await?;
        info!(%id, "Product deleted");
        Ok(product)
    }
}
