//! Error types for the favorite store.

use thiserror::Error;

/// Errors that can occur during favorite store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The record handed to the store is not a valid favorite.
    #[error("Favorite validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for StoreError {
    fn from(msg: String) -> Self {
        StoreError::ActorCommunicationError(msg)
    }
}
