//! # Framework Errors
//!
//! Errors raised by the record store plumbing itself. Record types bring their
//! own validation error, which is boxed into [`FrameworkError::RecordError`].

/// Errors that can occur while talking to a [`RecordActor`](crate::RecordActor).
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Record error: {0}")]
    RecordError(Box<dyn std::error::Error + Send + Sync>),
}
