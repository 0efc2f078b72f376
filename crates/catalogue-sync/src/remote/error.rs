//! Error types for the remote catalogue.

use thiserror::Error;

/// Errors that can occur while fetching from the remote catalogue.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogueError {
    /// The requested page or episode does not exist.
    #[error("Catalogue resource not found: {0}")]
    NotFound(String),

    /// The catalogue answered with an unexpected status.
    #[error("Catalogue returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The catalogue could not be reached at all.
    #[error("Catalogue unavailable: {0}")]
    Unavailable(String),
}
