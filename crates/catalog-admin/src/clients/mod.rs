//! Resource-specific clients.
//!
//! Each client wraps a `ResourceClient<T>` and implements [`StoreClient`](store_actor::StoreClient),
//! which provides `get`, `find_by_name`, `list` and `delete`. Writes are exposed as inherent
//! methods taking the resource's own payload type.

pub mod category_client;
pub mod product_client;

pub use category_client::CategoryClient;
pub use product_client::ProductClient;
