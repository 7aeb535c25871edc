//! # Generic Client
//!
//! This module defines the generic client for communicating with a store actor.

use crate::entity::ResourceEntity;
use crate::error::StoreError;
use crate::message::ResourceRequest;
use tokio::sync::{mpsc, oneshot};

/// Result type of every store operation for entity `T`.
pub type StoreResult<T, R> = Result<R, StoreError<<T as ResourceEntity>::Error>>;

/// A type-safe client for interacting with a `ResourceActor`.
///
/// The client holds only a sender, so cloning is inexpensive and clones can be shared across
/// tasks. Requests are answered over oneshot channels.
pub struct ResourceClient<T: ResourceEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ResourceEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ResourceEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<StoreResult<T, R>>) -> ResourceRequest<T>,
    ) -> StoreResult<T, R> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn create(&self, params: T::Create) -> StoreResult<T, T::Id> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> StoreResult<T, Option<T>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn find_by_name(
        &self,
        name: impl Into<String>,
        case_insensitive: bool,
        exclude: Option<T::Id>,
    ) -> StoreResult<T, Option<T>> {
        let name = name.into();
        self.request(|respond_to| ResourceRequest::FindByName {
            name,
            case_insensitive,
            exclude,
            respond_to,
        })
        .await
    }

    pub async fn list(&self) -> StoreResult<T, Vec<T>> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> StoreResult<T, T> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> StoreResult<T, ()> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}
