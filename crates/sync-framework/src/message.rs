//! # Store Messages
//!
//! Requests sent from a [`RecordClient`](crate::RecordClient) to a
//! [`RecordActor`](crate::RecordActor). Every request carries a one-shot
//! responder; the actor answers each request exactly once.

use crate::error::FrameworkError;
use crate::record::StoreRecord;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Query contract of a keyed record store.
///
/// - **Exists**: does a record with this key exist?
/// - **Get**: fetch a copy of the record, if any.
/// - **Insert**: write a record; answers `true` when the key was new.
/// - **Delete**: remove a record; answers `true` when something was removed.
/// - **All**: a snapshot of every record, ordered by key.
#[derive(Debug)]
pub enum StoreRequest<T: StoreRecord> {
    Exists {
        id: T::Id,
        respond_to: Response<bool>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Insert {
        record: T,
        respond_to: Response<bool>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
    All {
        respond_to: Response<Vec<T>>,
    },
}
