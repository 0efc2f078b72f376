//! # Mock Store & Testing Guide
//!
//! Two ways to stand in for a [`RecordActor`](crate::RecordActor) in tests.
//!
//! ## Scripted responses: [`MockStore`]
//!
//! Queue the answers the store should give, hand [`MockStore::client`] to the
//! code under test, and call [`MockStore::verify`] at the end. This is the
//! easiest way to inject failures that a real store never produces.
//!
//! ```rust
//! use sync_framework::mock::MockStore;
//! use sync_framework::{FrameworkError, StoreRecord};
//!
//! #[derive(Clone, Debug)] struct Bookmark { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct BookmarkError;
//! impl StoreRecord for Bookmark {
//!     type Id = u32; type Error = BookmarkError;
//!     fn id(&self) -> u32 { self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Bookmark>::new();
//!     mock.expect_exists(1).return_ok(true);
//!     mock.expect_insert().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.exists(1).await.unwrap());
//!     assert!(matches!(
//!         client.insert(Bookmark { id: 2 }).await,
//!         Err(FrameworkError::ActorClosed)
//!     ));
//!     mock.verify();
//! }
//! ```
//!
//! ## Raw requests: [`create_mock_client`]
//!
//! Returns a client and the receiving end of its request channel. The test
//! pulls requests with [`expect_exists`] / [`expect_insert`] and answers
//! through the responder, which allows asserting on the request payload and
//! controlling exactly when the answer arrives.

use crate::client::RecordClient;
use crate::error::FrameworkError;
use crate::message::StoreRequest;
use crate::record::StoreRecord;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

/// An expected request and the answer to give.
enum Expectation<T: StoreRecord> {
    Exists {
        id: T::Id,
        response: Result<bool, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Insert {
        response: Result<bool, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<bool, FrameworkError>,
    },
    All {
        response: Result<Vec<T>, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store with expectation tracking for fluent testing.
///
/// Expectations are answered in the order they were queued. A request that
/// does not match the next expectation, including its id, panics the mock task; the caller then
/// sees [`FrameworkError::ActorDropped`] and [`verify`](Self::verify) reports
/// the leftover expectations.
pub struct MockStore<T: StoreRecord> {
    client: RecordClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreRecord> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreRecord> MockStore<T> {
    /// Creates a new mock store with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let (_snapshot, observer) = watch::channel(Vec::new());
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Exists { id, respond_to },
                        Some(Expectation::Exists {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Insert { respond_to, .. },
                        Some(Expectation::Insert { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::All { respond_to }, Some(Expectation::All { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: RecordClient::new(sender, observer),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> RecordClient<T> {
        self.client.clone()
    }

    /// Expects an `exists` query.
    pub fn expect_exists(&mut self, id: T::Id) -> ExpectationBuilder<T, bool> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Exists { id, response }
        })
    }

    /// Expects a `get` query.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Get { id, response }
        })
    }

    /// Expects an `insert`.
    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, bool> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Insert { response }
        })
    }

    /// Expects a `delete`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, bool> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Delete { id, response }
        })
    }

    /// Expects an `all` snapshot query.
    pub fn expect_all(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::All { response }
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder that records the answer for one expected request.
pub struct ExpectationBuilder<T: StoreRecord, R> {
    expectations: Expectations<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: StoreRecord, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Expectations<T>,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            make: Box::new(make),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(expectation);
    }
}

/// Creates a mock client and a receiver for asserting requests.
///
/// The client's `observe_all` stream yields a single empty set and ends.
pub fn create_mock_client<T: StoreRecord>(
    buffer_size: usize,
) -> (RecordClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_snapshot, observer) = watch::channel(Vec::new());
    (RecordClient::new(sender, observer), receiver)
}

/// Helper to verify that the next message is an Exists request
pub async fn expect_exists<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<bool, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Exists { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<bool, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}
