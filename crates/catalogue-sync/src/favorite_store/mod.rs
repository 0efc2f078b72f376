//! # Favorite Store
//!
//! Keyed persistence of favorited characters, backed by a generic
//! [`RecordActor`]. A [`FavoriteRecord`] existing under a character id is
//! what makes that character a favorite; inserting it again replaces the
//! stored copy, so the store never holds duplicates.
//!
//! ## Structure
//!
//! - `record` - [`StoreRecord`](sync_framework::StoreRecord) implementation for [`FavoriteRecord`]
//! - [`error`] - [`StoreError`] type for store failures
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use catalogue_sync::favorite_store;
//! use catalogue_sync::model::CharacterId;
//! use sync_framework::StoreClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = favorite_store::new(32);
//!     tokio::spawn(actor.run());
//!
//!     assert!(!client.exists(CharacterId(1)).await?);
//!     Ok(())
//! }
//! ```

pub mod error;
mod record;

pub use error::*;

use crate::clients::FavoriteClient;
use crate::model::FavoriteRecord;
use sync_framework::RecordActor;

/// Creates a new favorite store actor and its client.
pub fn new(buffer_size: usize) -> (RecordActor<FavoriteRecord>, FavoriteClient) {
    let (actor, generic_client) = RecordActor::new(buffer_size);
    let client = FavoriteClient::new(generic_client);

    (actor, client)
}
