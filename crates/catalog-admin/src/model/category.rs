//! Catalog categories.
//!
//! [`Category`] implements [`ResourceEntity`](store_actor::ResourceEntity) with the
//! unique-name constraint switched on: no two categories share a name, ignoring case.
//! See `category_actor::entity` for the trait implementation.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Type-safe identifier for Categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for CategoryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Payload for creating a category. `name` is already sanitized and validated.
#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
}

/// Payload for renaming a category.
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub name: String,
}
