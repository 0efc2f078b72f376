//! # Favorite Client
//!
//! Provides a high-level API for interacting with the favorite store actor.
//! It wraps a `RecordClient<FavoriteRecord>` and exposes character-level
//! methods on top of the `exists` / `get` / `delete` queries that
//! [`StoreClient`] provides.
use crate::favorite_store::StoreError;
use crate::model::{Character, FavoriteRecord};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use sync_framework::{FrameworkError, RecordClient, StoreClient};
use tracing::{debug, instrument};

/// Client for interacting with the favorite store.
#[derive(Clone)]
pub struct FavoriteClient {
    inner: RecordClient<FavoriteRecord>,
}

impl FavoriteClient {
    pub fn new(inner: RecordClient<FavoriteRecord>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreClient<FavoriteRecord> for FavoriteClient {
    type Error = StoreError;

    fn inner(&self) -> &RecordClient<FavoriteRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::RecordError(e) => StoreError::ValidationError(e.to_string()),
            e => StoreError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl FavoriteClient {
    /// Stores `character` as a favorite. Returns `true` when it was not stored before.
    #[instrument(skip(self, character), fields(character_id = %character.id))]
    pub async fn insert(&self, character: &Character) -> Result<bool, StoreError> {
        debug!("Sending request");
        self.inner
            .insert(FavoriteRecord::from(character))
            .await
            .map_err(Self::map_error)
    }

    /// Snapshot of every favorite, ordered by character id.
    #[instrument(skip(self))]
    pub async fn favorites(&self) -> Result<Vec<Character>, StoreError> {
        debug!("Sending request");
        let records = self.inner.all().await.map_err(Self::map_error)?;
        Ok(records
            .into_iter()
            .map(FavoriteRecord::into_character)
            .collect())
    }

    /// The favorites as characters: the current set first, then again after
    /// every insert or delete. Each call is an independent subscription.
    pub fn observe_all(&self) -> impl Stream<Item = Vec<Character>> + Send + Unpin {
        self.inner.observe_all().map(|records| {
            records
                .into_iter()
                .map(FavoriteRecord::into_character)
                .collect()
        })
    }
}
