//! Pure data structures implementing the [`ResourceEntity`](store_actor::ResourceEntity) trait.

pub mod category;
pub mod product;

pub use category::*;
pub use product::*;

use serde::Serialize;
use std::fmt::Display;

/// The catalog resource types that go through the mutation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    Category,
    Product,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Category => "Category",
            ResourceKind::Product => "Product",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
