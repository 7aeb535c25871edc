//! Fixtures shared by unit tests.

use crate::model::{
    CategoryId, PackageOption, Product, ProductCreate, ProductFields, ProductId, ProductImage,
    Technology,
};

pub fn fields_in(category_id: CategoryId) -> ProductFields {
    ProductFields {
        name: "Starter Kit".to_string(),
        description: "Everything to get going".to_string(),
        category_id,
        live_demo_link: None,
        git_hub_link: None,
        technologies: vec![Technology {
            name: "Rust".to_string(),
        }],
        addon: PackageOption::FullStack,
    }
}

pub fn image() -> ProductImage {
    ProductImage {
        file_name: "kit.png".to_string(),
        content_type: "image/png".to_string(),
        size: 2048,
    }
}

pub fn product_create(category_id: CategoryId) -> ProductCreate {
    ProductCreate {
        fields: fields_in(category_id),
        image: image(),
    }
}

pub fn product_in(category_id: CategoryId) -> Product {
    Product::new(ProductId::generate(), fields_in(category_id), image())
}
