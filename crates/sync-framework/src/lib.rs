//! # Sync Framework
//!
//! Building blocks for screen controllers that talk to slow collaborators
//! (a remote catalogue, a local store) without ever blocking the task that
//! owns UI state.
//!
//! ## Architecture Overview
//!
//! The crate is split into three concerns:
//!
//! 1. **Record store** ([`StoreRecord`], [`RecordActor`], [`RecordClient`]) -
//!    a keyed collection owned by a single Tokio task, queried over a channel,
//!    with a reactive "all records" stream.
//! 2. **Event dispatch** ([`Event`], [`EventEmitter`], [`EventReceiver`]) -
//!    single-use UI instructions delivered from a controller to its observer.
//! 3. **Cancellation** ([`DisposeBag`]) - every background task a controller
//!    spawns is tracked and aborted together when the controller goes away.
//!
//! ## Concurrency Model
//!
//! - Each actor (store or controller) runs in its own Tokio task and handles
//!   its messages **sequentially**, so its state needs no locks.
//! - Slow work is spawned into a [`DisposeBag`]; results come back to the
//!   owning task as messages.
//! - Clients are cheap to clone and only hold channel senders.
//!
//! ## Quick Start
//!
//! ```rust
//! use sync_framework::{event_channel, RecordActor, StoreRecord};
//!
//! #[derive(Clone, Debug)]
//! struct Bookmark { id: u32, title: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("empty title")]
//! struct BookmarkError;
//!
//! impl StoreRecord for Bookmark {
//!     type Id = u32;
//!     type Error = BookmarkError;
//!
//!     fn id(&self) -> u32 { self.id }
//!
//!     fn validate(&self) -> Result<(), BookmarkError> {
//!         if self.title.is_empty() { Err(BookmarkError) } else { Ok(()) }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = RecordActor::<Bookmark>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     client.insert(Bookmark { id: 1, title: "Pilot".into() }).await.unwrap();
//!     assert!(client.insert(Bookmark { id: 2, title: String::new() }).await.is_err());
//!
//!     let (emitter, mut events) = event_channel();
//!     emitter.emit(client.all().await.unwrap().len());
//!     let event = events.recv().await.unwrap();
//!     assert_eq!(event.consume(), Some(&1));
//!     assert_eq!(event.consume(), None);
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted [`MockStore`](mock::MockStore) and
//! raw request helpers for exercising store clients without a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod dispose;
pub mod error;
pub mod event;
pub mod message;
pub mod mock;
pub mod record;
pub mod tracing;

// Re-export core types for convenience
pub use actor::RecordActor;
pub use client::RecordClient;
pub use client_trait::StoreClient;
pub use dispose::DisposeBag;
pub use error::FrameworkError;
pub use event::{event_channel, Event, EventEmitter, EventReceiver};
pub use message::{Response, StoreRequest};
pub use record::StoreRecord;
