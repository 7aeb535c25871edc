//! # Category Client
//!
//! Provides a high-level API for interacting with the `Category` store.
//! It wraps a `ResourceClient<Category>` and translates store failures into [`CategoryError`].
use crate::category_actor::CategoryError;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use async_trait::async_trait;
use store_actor::{ResourceClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Category store.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: ResourceClient<Category>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreClient<Category> for CategoryClient {
    type Error = CategoryError;

    fn inner(&self) -> &ResourceClient<Category> {
        &self.inner
    }

    fn map_error(e: StoreError<CategoryError>) -> Self::Error {
        match e {
            StoreError::NotFound(id) => CategoryError::NotFound(id),
            StoreError::ConstraintViolated { value, .. } => CategoryError::DuplicateName(value),
            StoreError::Entity(e) => e,
            other @ (StoreError::Closed | StoreError::Dropped) => {
                CategoryError::Store(other.to_string())
            }
        }
    }
}

impl CategoryClient {
    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        params: CategoryCreate,
    ) -> Result<CategoryId, CategoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
