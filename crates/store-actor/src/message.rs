//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ResourceEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T, E> = oneshot::Sender<Result<T, StoreError<E>>>;

/// Shorthand for a response channel whose error is the entity's own error type.
pub type EntityResponse<T, R> = Response<R, <T as ResourceEntity>::Error>;

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// The variants map to the operations a resource store exposes:
///
/// - **Create**: Uses [`ResourceEntity::Create`] to initialize a new resource; answers with its id.
/// - **Get**: Fetches the current state of a resource by id.
/// - **FindByName**: Looks a resource up by name, optionally ignoring case and one excluded id.
/// - **List**: Snapshot of every stored resource.
/// - **Update**: Uses [`ResourceEntity::Update`] to replace mutable fields.
/// - **Delete**: Removes the resource.
#[derive(Debug)]
pub enum ResourceRequest<T: ResourceEntity> {
    Create {
        params: T::Create,
        respond_to: EntityResponse<T, T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: EntityResponse<T, Option<T>>,
    },
    FindByName {
        name: String,
        case_insensitive: bool,
        exclude: Option<T::Id>,
        respond_to: EntityResponse<T, Option<T>>,
    },
    List {
        respond_to: EntityResponse<T, Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: EntityResponse<T, T>,
    },
    Delete {
        id: T::Id,
        respond_to: EntityResponse<T, ()>,
    },
}

impl<T: ResourceEntity> ResourceRequest<T> {
    /// Short operation label, recorded in the mock call log.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Get { .. } => "get",
            Self::FindByName { .. } => "find_by_name",
            Self::List { .. } => "list",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}
