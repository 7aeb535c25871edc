//! # StoreClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default read and delete
//! operations built on top of a generic `ResourceClient` and translated into the resource's own
//! error type.
use crate::{ResourceClient, ResourceEntity, StoreError};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard store operations.
///
/// # Example
///
/// ```rust
/// use store_actor::{ResourceClient, ResourceEntity, StoreClient, StoreError};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32, name: String }
/// #[derive(Debug)] struct TagCreate;
/// #[derive(Debug)] struct TagUpdate;
/// #[derive(Debug, thiserror::Error)]
/// enum TagError {
///     #[error("tag {0} not found")] NotFound(String),
///     #[error("store unavailable: {0}")] Store(String),
/// }
///
/// #[async_trait]
/// impl ResourceEntity for Tag {
///     type Id = u32; type Create = TagCreate; type Update = TagUpdate;
///     type Context = (); type Error = TagError;
///     fn name(&self) -> &str { &self.name }
///     fn from_create_params(id: u32, _: TagCreate) -> Result<Self, TagError> {
///         Ok(Self { id, name: String::new() })
///     }
///     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagClient { inner: ResourceClient<Tag> }
///
/// impl StoreClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &ResourceClient<Tag> { &self.inner }
///     fn map_error(e: StoreError<TagError>) -> TagError {
///         match e {
///             StoreError::NotFound(id) => TagError::NotFound(id),
///             StoreError::Entity(e) => e,
///             other => TagError::Store(other.to_string()),
///         }
///     }
/// }
///
/// async fn usage(client: TagClient) {
///     // get(), find_by_name(), list() and delete() are provided automatically.
///     let _ = client.get(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait StoreClient<T: ResourceEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map store errors to the resource error type.
    fn map_error(e: StoreError<T::Error>) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Find an entity by name, ignoring case, skipping `exclude`.
    #[tracing::instrument(skip(self))]
    async fn find_by_name(
        &self,
        name: &str,
        exclude: Option<T::Id>,
    ) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .find_by_name(name, true, exclude)
            .await
            .map_err(Self::map_error)
    }

    /// Snapshot of every stored entity.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
