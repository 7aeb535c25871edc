//! # Generic Store Actor
//!
//! This module defines the `ResourceActor`, the component that owns the stored entities of one
//! resource type. It processes requests sequentially, so every individual store operation,
//! including the unique-name check, is atomic with respect to the others.

use crate::client::ResourceClient;
use crate::entity::{fold_name, ResourceEntity};
use crate::error::{StoreError, UNIQUE_NAME_CONSTRAINT};
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that stores a collection of entities.
///
/// This struct is the "server" half of the store. It owns the state (`store`) and
/// the receiver end of the channel. Each actor processes one message at a time, so the store
/// needs no `Mutex` or `RwLock`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use store_actor::{ResourceActor, ResourceEntity};
/// use async_trait::async_trait;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// #[derive(Clone, Debug)] struct Tag { id: u32, name: String }
/// #[derive(Debug)] struct TagCreate { name: String }
/// #[derive(Debug)] struct TagUpdate { name: String }
/// #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
///
/// #[async_trait]
/// impl ResourceEntity for Tag {
///     type Id = u32;
///     type Create = TagCreate;
///     type Update = TagUpdate;
///     type Context = ();
///     type Error = TagError;
///     const UNIQUE_NAME: bool = true;
///
///     fn name(&self) -> &str { &self.name }
///     fn from_create_params(id: u32, p: TagCreate) -> Result<Self, TagError> {
///         Ok(Self { id, name: p.name })
///     }
///     async fn on_update(&mut self, u: TagUpdate, _: &()) -> Result<(), TagError> {
///         self.name = u.name;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let counter = AtomicU32::new(1);
///     let (actor, client) = ResourceActor::<Tag>::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
///     tokio::spawn(actor.run(()));
///
///     client.create(TagCreate { name: "Rust".into() }).await.unwrap();
///     // Same name in a different case violates the constraint.
///     assert!(client.create(TagCreate { name: "rust".into() }).await.is_err());
/// }
/// ```
///
/// ## Operations
///
/// * **Create**: generates an id, builds the entity, runs `on_create`, enforces the name
///   constraint, inserts.
/// * **Get** / **FindByName** / **List**: read-only, answer with clones.
/// * **Update**: runs `on_update` on a clone, enforces the name constraint against every other
///   entity, then replaces the stored entity. A rejected update leaves the store untouched.
/// * **Delete**: runs `on_delete`, removes.
pub struct ResourceActor<T: ResourceEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ResourceEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// * `buffer_size` - capacity of the MPSC channel; callers wait when it is full.
    /// * `next_id_fn` - produces the id of every created entity.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Finds another entity whose name equals `name` ignoring case.
    fn name_taken(&self, name: &str, exclude: Option<&T::Id>) -> bool {
        let folded = fold_name(name);
        self.store
            .iter()
            .any(|(id, item)| Some(id) != exclude && fold_name(item.name()) == folded)
    }

    fn find_by_name(
        &self,
        name: &str,
        case_insensitive: bool,
        exclude: Option<&T::Id>,
    ) -> Option<T> {
        let folded = fold_name(name);
        self.store
            .iter()
            .filter(|(id, _)| Some(*id) != exclude)
            .find(|(_, item)| {
                if case_insensitive {
                    fold_name(item.name()) == folded
                } else {
                    item.name() == name
                }
            })
            .map(|(_, item)| item.clone())
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` argument is injected into every entity hook and dropped when the loop ends.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Category" instead of "catalog_admin::model::category::Category")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::Entity(e)));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(StoreError::Entity(e)));
                        continue;
                    }
                    if T::UNIQUE_NAME && self.name_taken(item.name(), None) {
                        warn!(entity_type, name = item.name(), "Name taken");
                        let _ = respond_to.send(Err(StoreError::ConstraintViolated {
                            constraint: UNIQUE_NAME_CONSTRAINT,
                            value: item.name().to_string(),
                        }));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::FindByName {
                    name,
                    case_insensitive,
                    exclude,
                    respond_to,
                } => {
                    let item = self.find_by_name(&name, case_insensitive, exclude.as_ref());
                    debug!(
                        entity_type,
                        %name,
                        case_insensitive,
                        found = item.is_some(),
                        "FindByName"
                    );
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = current.clone();
                    if let Err(e) = staged.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::Entity(e)));
                        continue;
                    }
                    if T::UNIQUE_NAME && self.name_taken(staged.name(), Some(&id)) {
                        warn!(entity_type, %id, name = staged.name(), "Name taken");
                        let _ = respond_to.send(Err(StoreError::ConstraintViolated {
                            constraint: UNIQUE_NAME_CONSTRAINT,
                            value: staged.name().to_string(),
                        }));
                        continue;
                    }
                    self.store.insert(id.clone(), staged.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(staged));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(StoreError::Entity(e)));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
