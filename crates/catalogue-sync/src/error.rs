//! # Sync Errors
//!
//! The failure taxonomy callers of the controllers see. Each layer keeps its
//! own error type; [`SyncError`] wraps them so a single `?` carries a failure
//! from the catalogue, the store or the mapper up to the caller.

use crate::api::MappingError;
use crate::favorite_store::StoreError;
use crate::remote::CatalogueError;
use thiserror::Error;

/// Errors surfaced by controller operations and carried by error events.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SyncError {
    /// Transport or HTTP failure reported by the remote catalogue.
    #[error("Network failure: {0}")]
    Network(#[from] CatalogueError),

    /// The favorite store failed to answer.
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    /// A remote record could not be turned into a domain entity.
    #[error("Mapping failure: {0}")]
    Mapping(#[from] MappingError),

    /// A favorite operation was requested before the screen had a character.
    #[error("No character bound to this screen")]
    MissingCharacter,

    /// The controller task has stopped; the screen is gone.
    #[error("Controller closed")]
    ControllerClosed,
}
