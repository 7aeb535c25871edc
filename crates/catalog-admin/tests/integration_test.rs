use async_trait::async_trait;
use catalog_admin::config::{CatalogConfig, RevalidationConfig};
use catalog_admin::form::{FormData, FormFile};
use catalog_admin::lifecycle::CatalogSystem;
use catalog_admin::revalidate::{CacheError, MemoryViewCache, ViewCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const MISSING_ID: &str = "00000000-0000-4000-8000-000000000000";

fn inline_config() -> CatalogConfig {
    CatalogConfig {
        revalidation: RevalidationConfig {
            detached: false,
            ..RevalidationConfig::default()
        },
        ..CatalogConfig::default()
    }
}

fn start() -> (CatalogSystem, Arc<MemoryViewCache>) {
    let cache = Arc::new(MemoryViewCache::new());
    let system = CatalogSystem::new(inline_config(), cache.clone());
    (system, cache)
}

fn category(name: &str) -> FormData {
    FormData::new().text("categoryName", name)
}

fn product(category_id: &str) -> FormData {
    FormData::new()
        .text("name", "Cold Brew Kit")
        .text("description", "Everything for cold brew at home")
        .text("categoryId", category_id)
        .text("productTechs", r#"[{"name": "Rust"}]"#)
        .text("productAddons", r#"[{"name": "Backend"}]"#)
        .file("image", FormFile::new("kit.png", "image/png", 4096))
}

async fn category_id(system: &CatalogSystem, name: &str) -> String {
    system
        .actions()
        .categories()
        .await
        .expect("Failed to list categories")
        .into_iter()
        .find(|c| c.name == name)
        .map(|c| c.id.to_string())
        .expect("Category not found")
}

#[tokio::test]
async fn test_duplicate_category_name_is_a_conflict() {
    let (system, _cache) = start();
    let actions = system.actions();

    let created = actions.add_category(None, &category("Drinks")).await;
    assert_eq!(created.status, 201);
    assert_eq!(created.message, "Category added successfully.");
    assert!(created.error.is_none());

    let duplicate = actions.add_category(Some(&created), &category("drinks")).await;
    assert_eq!(duplicate.status, 409);
    assert_eq!(duplicate.message, "Category already exists.");
    assert_eq!(
        duplicate.field_error("categoryName"),
        Some("Category \"drinks\" already exists.")
    );

    assert_eq!(actions.categories().await.unwrap().len(), 1);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_to_own_name_succeeds() {
    let (system, _cache) = start();
    let actions = system.actions();
    actions.add_category(None, &category("Snacks")).await;
    let id = category_id(&system, "Snacks").await;

    let same = actions.update_category(&id, None, &category("Snacks")).await;
    assert_eq!(same.status, 200);
    assert_eq!(same.message, "Category updated successfully.");

    let recased = actions.update_category(&id, None, &category("SNACKS")).await;
    assert_eq!(recased.status, 200);
    assert_eq!(actions.categories().await.unwrap()[0].name, "SNACKS");
}

#[tokio::test]
async fn test_update_to_another_categorys_name_is_a_conflict() {
    let (system, _cache) = start();
    let actions = system.actions();
    actions.add_category(None, &category("Snacks")).await;
    actions.add_category(None, &category("Drinks")).await;
    let snacks = category_id(&system, "Snacks").await;

    let response = actions.update_category(&snacks, None, &category("dRINKS")).await;
    assert_eq!(response.status, 409);

    let names: Vec<String> = actions
        .categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Drinks", "Snacks"]);
}

#[tokio::test]
async fn test_update_missing_category_is_not_found() {
    let (system, cache) = start();
    let response = system
        .actions()
        .update_category(MISSING_ID, None, &category("Snacks"))
        .await;

    assert_eq!(response.status, 404);
    assert_eq!(response.message, "Category not found.");
    assert!(cache.invalidations().is_empty());
}

#[tokio::test]
async fn test_delete_missing_category_leaves_store_unchanged() {
    let (system, cache) = start();
    let actions = system.actions();
    actions.add_category(None, &category("Drinks")).await;
    let before = cache.invalidations().len();

    let response = actions.delete_category(MISSING_ID).await;
    assert_eq!(response.status, 404);
    assert_eq!(
        response.field_error("id"),
        Some("The specified category does not exist.")
    );

    assert_eq!(actions.categories().await.unwrap().len(), 1);
    assert_eq!(cache.invalidations().len(), before);
}

#[tokio::test]
async fn test_invalid_ids_are_rejected_before_the_store() {
    let (system, _cache) = start();
    let actions = system.actions();

    for response in [
        actions.delete_category("").await,
        actions.delete_category("42").await,
        actions.update_category("not-an-id", None, &category("Tea")).await,
    ] {
        assert_eq!(response.status, 400);
        assert_eq!(response.message, "Invalid category ID.");
        assert_eq!(
            response.field_error("id"),
            Some("Category ID is required and must be a valid identifier.")
        );
    }

    let product = actions.delete_product("").await;
    assert_eq!(product.message, "Invalid product ID.");
}

#[tokio::test]
async fn test_empty_sanitized_name_is_a_validation_error() {
    let (system, cache) = start();
    let actions = system.actions();

    let response = actions
        .add_category(None, &category("<script>alert('x')</script>"))
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(response.message, "Invalid input data.");
    assert_eq!(
        response.field_error("categoryName"),
        Some("Category name is required.")
    );
    assert!(actions.categories().await.unwrap().is_empty());
    assert!(cache.invalidations().is_empty());
}

#[tokio::test]
async fn test_successful_mutation_invalidates_dependent_views() {
    let (system, cache) = start();
    cache.render("/menu");
    cache.render("/admin/categories");

    system.actions().add_category(None, &category("Drinks")).await;

    assert_eq!(cache.invalidations(), vec!["/admin/categories", "/menu"]);
    assert!(!cache.is_cached("/menu"));
}

#[tokio::test]
async fn test_product_addon_count() {
    let (system, _cache) = start();
    let actions = system.actions();
    actions.add_category(None, &category("Kits")).await;
    let kits = category_id(&system, "Kits").await;

    let none = actions
        .add_product(None, &product(&kits).text("productAddons", "[]"))
        .await;
    assert_eq!(none.status, 400);
    assert_eq!(
        none.field_error("productAddons"),
        Some("Exactly one addon is required")
    );

    let two = actions
        .add_product(
            None,
            &product(&kits).text("productAddons", r#"[{"name": "UI"}, {"name": "UX"}]"#),
        )
        .await;
    assert_eq!(two.status, 400);
    assert_eq!(two.field_error("productAddons"), Some("Only one addon is allowed"));

    assert!(actions.products().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_product_lifecycle() {
    let (system, cache) = start();
    let actions = system.actions();
    actions.add_category(None, &category("Kits")).await;
    let kits = category_id(&system, "Kits").await;

    let created = actions.add_product(None, &product(&kits)).await;
    assert_eq!(created.status, 201);
    assert_eq!(created.message, "Product added successfully.");

    let id = actions.products().await.unwrap()[0].id.to_string();
    let details = actions.product_details(&id).await.expect("Product not found");
    assert_eq!(details.category.map(|c| c.name).as_deref(), Some("Kits"));
    assert_eq!(details.product.image.file_name, "kit.png");

    // No file chosen: the browser submits an empty part and the image is kept.
    let update = product(&kits)
        .text("name", "Hot Brew Kit")
        .file("image", FormFile::new("", "application/octet-stream", 0));
    let updated = actions.update_product(&id, None, &update).await;
    assert_eq!(updated.status, 200);

    let details = actions.product_details(&id).await.expect("Product not found");
    assert_eq!(details.product.name, "Hot Brew Kit");
    assert_eq!(details.product.image.file_name, "kit.png");
    assert!(cache
        .invalidations()
        .contains(&format!("/admin/menu-items/{id}/edit")));

    let deleted = actions.delete_product(&id).await;
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.message, "Product deleted successfully.");

    let again = actions.delete_product(&id).await;
    assert_eq!(again.status, 404);
    assert!(actions.product_details(&id).await.is_none());
}

#[tokio::test]
async fn test_product_must_reference_a_live_category() {
    let (system, _cache) = start();
    let actions = system.actions();

    let response = actions.add_product(None, &product(MISSING_ID)).await;

    assert_eq!(response.status, 400);
    assert_eq!(
        response.field_error("categoryId"),
        Some("Selected category does not exist")
    );
    assert!(actions.products().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_category_delete_is_restricted_while_referenced() {
    let (system, _cache) = start();
    let actions = system.actions();
    actions.add_category(None, &category("Kits")).await;
    let kits = category_id(&system, "Kits").await;
    actions.add_product(None, &product(&kits)).await;

    let restricted = actions.delete_category(&kits).await;
    assert_eq!(restricted.status, 409);
    assert_eq!(
        restricted.field_error("id"),
        Some("Category \"Kits\" still has 1 product(s).")
    );
    assert_eq!(actions.categories().await.unwrap().len(), 1);

    let product_id = actions.products().await.unwrap()[0].id.to_string();
    assert_eq!(actions.delete_product(&product_id).await.status, 200);

    let deleted = actions.delete_category(&kits).await;
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.message, "Category deleted successfully.");
    assert!(actions.categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_duplicate_creates_admit_one() {
    let (system, _cache) = start();

    let mut handles = vec![];
    for i in 0..10 {
        let actions = system.actions().clone();
        let name = if i % 2 == 0 { "Bakery" } else { "bakery" };
        handles.push(tokio::spawn(async move {
            actions.add_category(None, &category(name)).await.status
        }));
    }

    let mut statuses = vec![];
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    assert_eq!(statuses.iter().filter(|s| **s == 201).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == 409).count(), 9);
    assert_eq!(system.actions().categories().await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

/// Counts calls and fails every one of them.
struct FailingCache {
    calls: AtomicUsize,
}

#[async_trait]
impl ViewCache for FailingCache {
    async fn invalidate(&self, path: &str) -> Result<(), CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable(path.to_string()))
    }
}

#[tokio::test]
async fn test_invalidation_failures_do_not_change_the_result() {
    let cache = Arc::new(FailingCache {
        calls: AtomicUsize::new(0),
    });
    let system = CatalogSystem::new(inline_config(), cache.clone());
    let (healthy, _) = start();

    let failing = system.actions().add_category(None, &category("Drinks")).await;
    let expected = healthy.actions().add_category(None, &category("Drinks")).await;

    assert_eq!(failing, expected);
    assert_eq!(cache.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_shutdown_completes() {
    let (system, _cache) = start();
    system.actions().add_category(None, &category("Drinks")).await;
    assert!(system.shutdown().await.is_ok());
}

#[tokio::test]
async fn test_zero_store_buffer_still_starts() {
    let config = CatalogConfig {
        store_buffer: 0,
        ..inline_config()
    };
    let system = CatalogSystem::new(config, Arc::new(MemoryViewCache::new()));
    let created = system.actions().add_category(None, &category("Drinks")).await;
    assert_eq!(created.status, 201);
    assert!(system.shutdown().await.is_ok());
}
