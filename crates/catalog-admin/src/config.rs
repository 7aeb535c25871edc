//! Configuration Management
//!
//! Runtime settings for the catalog system, read from a JSON file. Every field has a default,
//! so an empty object (or no file at all) is a valid configuration.

use crate::model::ResourceKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CATALOG_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid config {path}: store_buffer must be at least 1")]
    StoreBuffer { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Channel capacity of each store actor.
    pub store_buffer: usize,
    pub revalidation: RevalidationConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            store_buffer: 32,
            revalidation: RevalidationConfig::default(),
        }
    }
}

/// Cached view paths that depend on each resource type. `{id}` is replaced with the id of the
/// mutated resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevalidationConfig {
    /// Run the fan-out on its own task instead of awaiting it.
    pub detached: bool,
    pub categories: Vec<String>,
    pub products: Vec<String>,
}

impl Default for RevalidationConfig {
    fn default() -> Self {
        Self {
            detached: true,
            categories: vec!["/admin/categories".into(), "/menu".into()],
            products: vec![
                "/admin/menu-items".into(),
                "/admin/menu-items/{id}/edit".into(),
                "/menu".into(),
            ],
        }
    }
}

impl RevalidationConfig {
    /// Concrete paths to invalidate after `kind` with `id` was written.
    pub fn paths_for(&self, kind: ResourceKind, id: &str) -> Vec<String> {
        let templates = match kind {
            ResourceKind::Category => &self.categories,
            ResourceKind::Product => &self.products,
        };
        templates
            .iter()
            .map(|template| template.replace("{id}", id))
            .collect()
    }
}

impl CatalogConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.store_buffer == 0 {
            return Err(ConfigError::StoreBuffer {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    /// Load from the file named by `CATALOG_CONFIG`, or defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }
}
