//! # Generic Record Client
//!
//! The async handle used to query and mutate a [`RecordActor`](crate::RecordActor).

use crate::error::FrameworkError;
use crate::message::StoreRequest;
use crate::record::StoreRecord;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_stream::wrappers::WatchStream;

/// A type-safe client for interacting with a `RecordActor`.
///
/// * **Cloneable** – holds a request sender and a snapshot receiver.
/// * **Async API** – every query resolves to `Result<…, FrameworkError>`.
/// * **Observable** – [`observe_all`](Self::observe_all) streams the full record set.
#[derive(Clone)]
pub struct RecordClient<T: StoreRecord> {
    sender: mpsc::Sender<StoreRequest<T>>,
    snapshot: watch::Receiver<Vec<T>>,
}

impl<T: StoreRecord> RecordClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>, snapshot: watch::Receiver<Vec<T>>) -> Self {
        Self { sender, snapshot }
    }

    pub async fn exists(&self, id: T::Id) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Exists { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Writes `record`, returning `true` if its key was not stored before.
    pub async fn insert(&self, record: T) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Insert { record, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Removes the record stored under `id`, returning `true` if one existed.
    pub async fn delete(&self, id: T::Id) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn all(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::All { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Streams the full record set: once immediately, then after every mutation.
    ///
    /// Each call starts a fresh subscription. Mutations that land between two
    /// polls are coalesced into the latest set. The stream ends when the actor
    /// shuts down.
    pub fn observe_all(&self) -> WatchStream<Vec<T>> {
        WatchStream::new(self.snapshot.clone())
    }
}
