//! Catalog products and their associations.
//!
//! A [`Product`] belongs to exactly one category, lists one or more technologies and carries
//! exactly one [`PackageOption`] addon. See `product_actor::entity` for the
//! [`ResourceEntity`](store_actor::ResourceEntity) implementation.

use crate::model::CategoryId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The package a product is sold as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageOption {
    FullStack,
    Backend,
    Frontend,
    #[serde(rename = "UI")]
    Ui,
    #[serde(rename = "UX")]
    Ux,
}

impl PackageOption {
    pub const ALL: [PackageOption; 5] = [
        PackageOption::FullStack,
        PackageOption::Backend,
        PackageOption::Frontend,
        PackageOption::Ui,
        PackageOption::Ux,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageOption::FullStack => "FullStack",
            PackageOption::Backend => "Backend",
            PackageOption::Frontend => "Frontend",
            PackageOption::Ui => "UI",
            PackageOption::Ux => "UX",
        }
    }
}

impl Display for PackageOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageOption {
    type Err = ();

    /// Exact, case-sensitive match on the option's wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or(())
    }
}

/// A technology a product is built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
}

/// Metadata of an uploaded product image. The bytes live in static storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductImage {
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub live_demo_link: Option<String>,
    pub git_hub_link: Option<String>,
    pub technologies: Vec<Technology>,
    pub addon: PackageOption,
    pub image: ProductImage,
}

/// Validated product fields shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub live_demo_link: Option<String>,
    pub git_hub_link: Option<String>,
    pub technologies: Vec<Technology>,
    pub addon: PackageOption,
}

/// Payload for creating a product; the image is mandatory.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub fields: ProductFields,
    pub image: ProductImage,
}

/// Payload for updating a product; a missing image keeps the current one.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub fields: ProductFields,
    pub image: Option<ProductImage>,
}

impl Product {
    pub fn new(id: ProductId, fields: ProductFields, image: ProductImage) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            category_id: fields.category_id,
            live_demo_link: fields.live_demo_link,
            git_hub_link: fields.git_hub_link,
            technologies: fields.technologies,
            addon: fields.addon,
            image,
        }
    }

    /// Replaces every mutable field; `image` only when a new one was supplied.
    pub fn apply(&mut self, fields: ProductFields, image: Option<ProductImage>) {
        self.name = fields.name;
        self.description = fields.description;
        self.category_id = fields.category_id;
        self.live_demo_link = fields.live_demo_link;
        self.git_hub_link = fields.git_hub_link;
        self.technologies = fields.technologies;
        self.addon = fields.addon;
        if let Some(image) = image {
            self.image = image;
        }
    }
}
