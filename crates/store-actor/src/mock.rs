//! # Mock Store & Testing Guide
//!
//! `MockStore<T>` hands out a real `ResourceClient<T>` whose requests are answered from a queue
//! of expectations instead of a running actor. It lets you test code that sits *around* a store
//! (validation pipelines, clients, other entities' hooks) deterministically, and inject failures
//! that are hard to reproduce with a real actor.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockStore | Real Actor |
//! |---------|-----------|------------|
//! | **State** | None (scripted answers) | Real state, real name constraint |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//! | **Call Assertions** | `calls()` log | Indirect (inspect state) |
//!
//! ## Example
//!
//! ```rust
//! use store_actor::mock::MockStore;
//! use store_actor::{ResourceEntity, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Tag { id: u32, name: String }
//! #[derive(Debug)] struct TagCreate;
//! #[derive(Debug)] struct TagUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//!
//! #[async_trait]
//! impl ResourceEntity for Tag {
//!     type Id = u32; type Create = TagCreate; type Update = TagUpdate;
//!     type Context = (); type Error = TagError;
//!     fn name(&self) -> &str { &self.name }
//!     fn from_create_params(id: u32, _: TagCreate) -> Result<Self, TagError> {
//!         Ok(Self { id, name: String::new() })
//!     }
//!     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), TagError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Tag>::new();
//!     mock.expect_get(1).return_err(StoreError::Closed);
//!
//!     let client = mock.client();
//!     assert!(matches!(client.get(1).await, Err(StoreError::Closed)));
//!
//!     mock.verify();
//!     assert_eq!(mock.calls(), vec!["get"]);
//! }
//! ```
//!
//! Requests that arrive with no matching expectation are recorded and their response channel is
//! dropped, so the caller sees [`StoreError::Dropped`]. `verify()` reports them.

use crate::client::{ResourceClient, StoreResult};
use crate::entity::ResourceEntity;
use crate::error::StoreError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted answer to one store request.
enum Expectation<T: ResourceEntity> {
    Create {
        response: StoreResult<T, T::Id>,
    },
    Get {
        id: T::Id,
        response: StoreResult<T, Option<T>>,
    },
    FindByName {
        response: StoreResult<T, Option<T>>,
    },
    List {
        response: StoreResult<T, Vec<T>>,
    },
    Update {
        id: T::Id,
        response: StoreResult<T, T>,
    },
    Delete {
        id: T::Id,
        response: StoreResult<T, ()>,
    },
}

struct MockState<T: ResourceEntity> {
    expectations: VecDeque<Expectation<T>>,
    calls: Vec<&'static str>,
    unexpected: Vec<String>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

/// A mock store with expectation tracking for fluent testing.
pub struct MockStore<T: ResourceEntity> {
    client: ResourceClient<T>,
    state: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ResourceEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ResourceEntity> MockStore<T> {
    /// Creates a new mock store with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: Shared<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            calls: Vec::new(),
            unexpected: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut state = task_state.lock().unwrap();
                state.calls.push(request.kind());
                let expectation = state.expectations.pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::FindByName { respond_to, .. },
                        Some(Expectation::FindByName { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        let note = format!("unexpected {} request", request.kind());
                        state.unexpected.push(note);
                        if let Some(expectation) = expectation {
                            state.expectations.push_front(expectation);
                        }
                        // Dropping `request` drops its responder; the caller sees `Dropped`.
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.state.lock().unwrap().expectations.push_back(expectation);
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, Box::new(|response| Expectation::Create { response }))
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, Box::new(move |response| Expectation::Get { id, response }))
    }

    /// Expects a `find_by_name` operation.
    pub fn expect_find_by_name(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, Box::new(|response| Expectation::FindByName { response }))
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, Box::new(|response| Expectation::List { response }))
    }

    /// Expects an `update` operation for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(
            self,
            Box::new(move |response| Expectation::Update { id, response }),
        )
    }

    /// Expects a `delete` operation for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(
            self,
            Box::new(move |response| Expectation::Delete { id, response }),
        )
    }

    /// Operation labels of every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

type MakeExpectation<T, R> = Box<dyn FnOnce(StoreResult<T, R>) -> Expectation<T> + Send>;

/// Builder that completes an expectation with its scripted response.
pub struct ExpectationBuilder<'a, T: ResourceEntity, R> {
    mock: &'a MockStore<T>,
    make: MakeExpectation<T, R>,
}

impl<'a, T: ResourceEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(mock: &'a MockStore<T>, make: MakeExpectation<T, R>) -> Self {
        Self { mock, make }
    }

    /// Answers the request successfully with `value`.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.make)(Ok(value)));
    }

    /// Answers the request with `error`.
    pub fn return_err(self, error: StoreError<T::Error>) {
        self.mock.push((self.make)(Err(error)));
    }
}

/// Creates a client and the raw receiver, for tests that want to answer requests by hand.
pub fn create_mock_client<T: ResourceEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}
