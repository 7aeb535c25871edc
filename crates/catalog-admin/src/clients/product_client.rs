//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` store.
//! It wraps a `ResourceClient<Product>` and exposes domain-specific methods.
use crate::model::{CategoryId, Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use store_actor::{ResourceClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Product store.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError<ProductError>) -> Self::Error {
        match e {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            StoreError::Entity(e) => e,
            // Products carry no name constraint; anything else means the store is unusable.
            other => ProductError::Store(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Number of products filed under `category_id`.
    #[instrument(skip(self))]
    pub async fn count_in_category(&self, category_id: CategoryId) -> Result<usize, ProductError> {
        debug!("Counting products");
        let products = self.list().await?;
        Ok(products
            .iter()
            .filter(|p| p.category_id == category_id)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product_create, product_in};
    use store_actor::mock::{create_mock_client, MockStore};
    use store_actor::ResourceRequest;

    #[tokio::test]
    async fn test_count_in_category_filters_by_reference() {
        let drinks = CategoryId::generate();
        let snacks = CategoryId::generate();
        let mut mock = MockStore::<Product>::new();
        mock.expect_list()
            .return_ok(vec![product_in(drinks), product_in(snacks), product_in(drinks)]);
        let client = ProductClient::new(mock.client());

        assert_eq!(client.count_in_category(drinks).await.unwrap(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unknown_category_is_passed_through() {
        let category_id = CategoryId::generate();
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let create_task = tokio::spawn(async move {
            product_client
                .create_product(product_create(category_id))
                .await
        });

        match receiver.recv().await {
            Some(ResourceRequest::Create { params, respond_to }) => {
                assert_eq!(params.fields.category_id, category_id);
                respond_to
                    .send(Err(StoreError::Entity(ProductError::UnknownCategory(
                        category_id,
                    ))))
                    .unwrap();
            }
            _ => panic!("Expected Create request"),
        }

        let result = create_task.await.unwrap();
        assert_eq!(result, Err(ProductError::UnknownCategory(category_id)));
    }

    #[tokio::test]
    async fn test_delete_of_missing_product_maps_to_not_found() {
        let id = ProductId::generate();
        let mut mock = MockStore::<Product>::new();
        mock.expect_delete(id)
            .return_err(StoreError::NotFound(id.to_string()));
        let client = ProductClient::new(mock.client());

        assert_eq!(
            client.delete(id).await,
            Err(ProductError::NotFound(id.to_string()))
        );
    }
}
