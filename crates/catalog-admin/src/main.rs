//! # Catalog Admin demo
//!
//! Starts the catalog stores and runs a short admin session through the mutation pipeline,
//! printing each [`ActionResponse`](catalog_admin::response::ActionResponse) as JSON.
//!
//! ```bash
//! RUST_LOG=info cargo run -p catalog-admin -- --config catalog.json
//! ```

use anyhow::{Context, Result};
use catalog_admin::config::CatalogConfig;
use catalog_admin::form::{FormData, FormFile};
use catalog_admin::lifecycle::{setup_tracing, CatalogSystem};
use catalog_admin::response::ActionResponse;
use catalog_admin::revalidate::MemoryViewCache;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Runs a scripted admin session against an in-memory catalog
#[derive(Parser, Debug)]
#[command(name = "catalog-admin", version, about, long_about = None)]
struct Args {
    /// JSON configuration file (defaults to $CATALOG_CONFIG, then built-in defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn print(step: &str, response: &ActionResponse) -> Result<()> {
    println!("{step:<32} {}", serde_json::to_string(response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing();

    let config = match &args.config {
        Some(path) => CatalogConfig::load(path),
        None => CatalogConfig::from_env(),
    }
    .context("loading configuration")?;

    let cache = Arc::new(MemoryViewCache::new());
    for path in ["/admin/categories", "/admin/menu-items", "/menu"] {
        cache.render(path);
    }

    let system = CatalogSystem::new(config, cache.clone());
    let actions = system.actions();

    let drinks = FormData::new().text("categoryName", "<b>Drinks</b>");
    print("add Drinks", &actions.add_category(None, &drinks).await)?;

    let duplicate = FormData::new().text("categoryName", "drinks");
    print("add drinks", &actions.add_category(None, &duplicate).await)?;

    let empty = FormData::new().text("categoryName", "<script>alert(1)</script>");
    print("add <script>", &actions.add_category(None, &empty).await)?;

    let categories = actions.categories().await?;
    let drinks_id = categories
        .first()
        .map(|c| c.id.to_string())
        .context("Drinks was not stored")?;

    let rename = FormData::new().text("categoryName", "Drinks");
    print(
        "update Drinks -> Drinks",
        &actions.update_category(&drinks_id, None, &rename).await,
    )?;

    let product = FormData::new()
        .text("name", "Cold Brew Kit")
        .text("description", "Everything for cold brew at home")
        .text("categoryId", drinks_id.as_str())
        .text("gitHubLink", "https://github.com/example/cold-brew")
        .text("productTechs", r#"[{"name": "Rust"}]"#)
        .text("productAddons", r#"[{"name": "FullStack"}]"#)
        .file("image", FormFile::new("kit.png", "image/png", 4096));
    print("add product", &actions.add_product(None, &product).await)?;

    let no_addon = product.clone().text("productAddons", "[]");
    print("add product, no addon", &actions.add_product(None, &no_addon).await)?;

    print(
        "delete Drinks (in use)",
        &actions.delete_category(&drinks_id).await,
    )?;
    print(
        "delete missing category",
        &actions
            .delete_category("00000000-0000-4000-8000-000000000000")
            .await,
    )?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!(invalidations = cache.invalidations().len(), "Session finished");
    Ok(())
}
