//! # Catalog Actions
//!
//! The caller-facing entry points, one per resource and operation. Each runs the pipeline
//! strictly in order and stops at the first failing step:
//!
//! 1. id check (update/delete)
//! 2. sanitize + validate ([`validation`](crate::validation))
//! 3. duplicate check, categories only ([`guard`](crate::guard))
//! 4. write ([`MutationExecutor`])
//! 5. invalidation fan-out ([`Revalidator`]), only after a successful write
//!
//! Whatever happens, the caller gets an [`ActionResponse`].
//!
//! ```rust,ignore
//! let form = FormData::new().text("categoryName", "Drinks");
//! let response = actions.add_category(None, &form).await;
//! assert_eq!(response.status, 201);
//! ```

use crate::category_actor::CategoryError;
use crate::clients::{CategoryClient, ProductClient};
use crate::executor::MutationExecutor;
use crate::form::FormData;
use crate::guard::check_duplicate;
use crate::model::{Category, CategoryId, Product, ProductId, ResourceKind};
use crate::product_actor::ProductError;
use crate::response::{ActionError, ActionResponse};
use crate::revalidate::Revalidator;
use crate::validation::{self, parse_id};
use serde::Serialize;
use store_actor::StoreClient;
use tracing::{debug, error, instrument};

/// A product together with the category it is filed under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}

type ActionResult = Result<ActionResponse, ActionError>;

/// Entry points for category and product mutations.
#[derive(Clone)]
pub struct CatalogActions {
    categories: CategoryClient,
    products: ProductClient,
    executor: MutationExecutor,
    revalidator: Revalidator,
}

impl CatalogActions {
    pub fn new(
        categories: CategoryClient,
        products: ProductClient,
        revalidator: Revalidator,
    ) -> Self {
        let executor = MutationExecutor::new(categories.clone(), products.clone());
        Self {
            categories,
            products,
            executor,
            revalidator,
        }
    }

    /// Creates a category from the `categoryName` field.
    ///
    /// `_prev` is the caller's previous response; it does not influence the result.
    #[instrument(skip_all)]
    pub async fn add_category(
        &self,
        _prev: Option<&ActionResponse>,
        form: &FormData,
    ) -> ActionResponse {
        let result = self.run_add_category(form).await;
        finish(ResourceKind::Category, "addCategory", None, result)
    }

    #[instrument(skip(self, _prev, form))]
    pub async fn update_category(
        &self,
        id: &str,
        _prev: Option<&ActionResponse>,
        form: &FormData,
    ) -> ActionResponse {
        let result = self.run_update_category(id, form).await;
        finish(ResourceKind::Category, "updateCategory", Some(id), result)
    }

    /// Deletes a category, provided it exists and no product refers to it.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: &str) -> ActionResponse {
        let result = self.run_delete_category(id).await;
        finish(ResourceKind::Category, "deleteCategory", Some(id), result)
    }

    #[instrument(skip_all)]
    pub async fn add_product(
        &self,
        _prev: Option<&ActionResponse>,
        form: &FormData,
    ) -> ActionResponse {
        let result = self.run_add_product(form).await;
        finish(ResourceKind::Product, "addProduct", None, result)
    }

    #[instrument(skip(self, _prev, form))]
    pub async fn update_product(
        &self,
        id: &str,
        _prev: Option<&ActionResponse>,
        form: &FormData,
    ) -> ActionResponse {
        let result = self.run_update_product(id, form).await;
        finish(ResourceKind::Product, "updateProduct", Some(id), result)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ActionResponse {
        let result = self.run_delete_product(id).await;
        finish(ResourceKind::Product, "deleteProduct", Some(id), result)
    }

    /// The product with its category, for the edit view. `None` when the id does not resolve
    /// or either store fails; failures are logged.
    #[instrument(skip(self))]
    pub async fn product_details(&self, id: &str) -> Option<ProductDetails> {
        let id: ProductId = parse_id(id)?;
        let product = match self.products.get(id).await {
            Ok(product) => product?,
            Err(e) => {
                error!(%id, error = %e, "Failed to fetch product");
                return None;
            }
        };
        let category = match self.categories.get(product.category_id).await {
            Ok(category) => category,
            Err(e) => {
                error!(%id, error = %e, "Failed to fetch product category");
                return None;
            }
        };
        Some(ProductDetails { product, category })
    }

    /// All categories ordered by name, for menu views.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CategoryError> {
        let mut categories = self.categories.list().await?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    /// All products ordered by name, for the menu-items view.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ProductError> {
        let mut products = self.products.list().await?;
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn run_add_category(&self, form: &FormData) -> ActionResult {
        let name = validation::validate_category(form)?;
        if let Some(conflict) = check_duplicate(&self.categories, &name, None)
            .await
            .map_err(unexpected)?
        {
            return Err(ActionError::Conflict { name: conflict.name });
        }
        let id = self.executor.create_category(name).await?;
        self.revalidator
            .after_mutation(ResourceKind::Category, &id.to_string())
            .await;
        Ok(ActionResponse::created(ResourceKind::Category))
    }

    async fn run_update_category(&self, id: &str, form: &FormData) -> ActionResult {
        let id: CategoryId = parse_id(id).ok_or(ActionError::InvalidId)?;
        let name = validation::validate_category(form)?;
        if let Some(conflict) = check_duplicate(&self.categories, &name, Some(id))
            .await
            .map_err(unexpected)?
        {
            return Err(ActionError::Conflict { name: conflict.name });
        }
        self.executor.update_category(id, name).await?;
        self.revalidator
            .after_mutation(ResourceKind::Category, &id.to_string())
            .await;
        Ok(ActionResponse::updated(ResourceKind::Category))
    }

    async fn run_delete_category(&self, id: &str) -> ActionResult {
        let id: CategoryId = parse_id(id).ok_or(ActionError::InvalidId)?;
        self.executor.delete_category(id).await?;
        self.revalidator
            .after_mutation(ResourceKind::Category, &id.to_string())
            .await;
        Ok(ActionResponse::deleted(ResourceKind::Category))
    }

    async fn run_add_product(&self, form: &FormData) -> ActionResult {
        let params = validation::validate_new_product(form)?;
        let id = self.executor.create_product(params).await?;
        self.revalidator
            .after_mutation(ResourceKind::Product, &id.to_string())
            .await;
        Ok(ActionResponse::created(ResourceKind::Product))
    }

    async fn run_update_product(&self, id: &str, form: &FormData) -> ActionResult {
        let id: ProductId = parse_id(id).ok_or(ActionError::InvalidId)?;
        let update = validation::validate_product_update(form)?;
        self.executor.update_product(id, update).await?;
        self.revalidator
            .after_mutation(ResourceKind::Product, &id.to_string())
            .await;
        Ok(ActionResponse::updated(ResourceKind::Product))
    }

    async fn run_delete_product(&self, id: &str) -> ActionResult {
        let id: ProductId = parse_id(id).ok_or(ActionError::InvalidId)?;
        self.executor.delete_product(id).await?;
        self.revalidator
            .after_mutation(ResourceKind::Product, &id.to_string())
            .await;
        Ok(ActionResponse::deleted(ResourceKind::Product))
    }
}

fn unexpected(e: CategoryError) -> ActionError {
    ActionError::Unexpected(e.to_string())
}

/// Shapes the outcome and logs failures that escaped the pipeline's own taxonomy.
fn finish(
    kind: ResourceKind,
    operation: &'static str,
    id: Option<&str>,
    result: ActionResult,
) -> ActionResponse {
    let response = result.unwrap_or_else(|e| {
        if let ActionError::Unexpected(detail) = &e {
            error!(operation, id = id.unwrap_or("-"), error = %detail, "Action failed");
        }
        e.respond(kind)
    });
    debug!(operation, status = response.status, "Action finished");
    response
}
