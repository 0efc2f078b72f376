//! # Record Store Actor
//!
//! The `RecordActor` owns a keyed collection of records and processes
//! [`StoreRequest`]s sequentially in its own Tokio task. Because the map is
//! only ever touched from that task, no `Mutex` guards it.
//!
//! Every mutation republishes the full, key-ordered set of records on a
//! `watch` channel. [`RecordClient::observe_all`] turns that channel into a
//! stream, which gives observers the current set on subscription and again
//! after each insert or delete.

use crate::client::RecordClient;
use crate::error::FrameworkError;
use crate::message::StoreRequest;
use crate::record::StoreRecord;
use std::collections::BTreeMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// # Usage Pattern
///
/// 1. **Create**: `RecordActor::new()` returns the actor (server) and a client.
/// 2. **Run**: spawn `actor.run()` in a background task.
/// 3. **Stop**: drop every client clone; the loop ends once the channel closes.
///
/// ```rust
/// use sync_framework::{RecordActor, StoreRecord};
///
/// #[derive(Clone, Debug)]
/// struct Bookmark { id: u32 }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("invalid bookmark")]
/// struct BookmarkError;
///
/// impl StoreRecord for Bookmark {
///     type Id = u32;
///     type Error = BookmarkError;
///     fn id(&self) -> u32 { self.id }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = RecordActor::<Bookmark>::new(10);
///     tokio::spawn(actor.run());
///
///     assert!(client.insert(Bookmark { id: 7 }).await.unwrap());
///     assert!(client.exists(7).await.unwrap());
/// }
/// ```
pub struct RecordActor<T: StoreRecord> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: BTreeMap<T::Id, T>,
    snapshot: watch::Sender<Vec<T>>,
}

impl<T: StoreRecord> RecordActor<T> {
    /// Creates a new `RecordActor` and its associated `RecordClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, RecordClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshot, observer) = watch::channel(Vec::new());
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            snapshot,
        };
        let client = RecordClient::new(sender, observer);
        (actor, client)
    }

    /// Runs the actor's event loop, processing requests until the channel closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "FavoriteRecord" instead of the full path)
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Exists { id, respond_to } => {
                    let found = self.store.contains_key(&id);
                    debug!(record_type, %id, found, "Exists");
                    let _ = respond_to.send(Ok(found));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(record_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Insert { record, respond_to } => {
                    let id = record.id();
                    if let Err(e) = record.validate() {
                        warn!(record_type, %id, error = %e, "Insert rejected");
                        let _ = respond_to.send(Err(FrameworkError::RecordError(Box::new(e))));
                        continue;
                    }
                    let created = self.store.insert(id.clone(), record).is_none();
                    info!(record_type, %id, created, size = self.store.len(), "Inserted");
                    self.publish();
                    let _ = respond_to.send(Ok(created));
                }
                StoreRequest::Delete { id, respond_to } => {
                    let removed = self.store.remove(&id).is_some();
                    if removed {
                        info!(record_type, %id, size = self.store.len(), "Deleted");
                        self.publish();
                    } else {
                        debug!(record_type, %id, "Delete of missing record");
                    }
                    let _ = respond_to.send(Ok(removed));
                }
                StoreRequest::All { respond_to } => {
                    debug!(record_type, size = self.store.len(), "All");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
            }
        }

        info!(record_type, size = self.store.len(), "Shutdown");
    }

    fn publish(&self) {
        // send_replace notifies even when no observer is subscribed yet
        self.snapshot
            .send_replace(self.store.values().cloned().collect());
    }
}
