//! # StoreRecord Trait
//!
//! The contract a value must satisfy to be kept by a [`RecordActor`](crate::RecordActor).
//!
//! A record carries its own key (`id()`), so the store never generates
//! identifiers: inserting a record whose key is already present replaces it
//! instead of creating a second copy.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A keyed value managed by a [`RecordActor`](crate::RecordActor).
///
/// # Ordering
/// `Id` must be `Ord`: the store keeps records sorted by key, so snapshots and
/// observed lists are returned in a stable order.
pub trait StoreRecord: Clone + Debug + Send + Sync + 'static {
    /// The key of the record (e.g. a character id).
    type Id: Ord + Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Error returned when a record fails validation on insert.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The key this record is stored under.
    fn id(&self) -> Self::Id;

    /// Called before the record is written. Rejecting here leaves the store untouched.
    fn validate(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}
