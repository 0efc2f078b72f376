//! # StoreClient Trait
//!
//! Common interface for record-specific store wrappers, adding default
//! `exists`, `get` and `delete` methods on top of a generic [`RecordClient`].
use crate::{FrameworkError, RecordClient, StoreRecord};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard store queries.
///
/// # Example
///
/// ```rust
/// use sync_framework::{FrameworkError, RecordClient, StoreClient, StoreRecord};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Bookmark { id: u32 }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct BookmarkError(String);
///
/// impl StoreRecord for Bookmark {
///     type Id = u32;
///     type Error = BookmarkError;
///     fn id(&self) -> u32 { self.id }
/// }
///
/// struct Bookmarks {
///     inner: RecordClient<Bookmark>,
/// }
///
/// #[async_trait]
/// impl StoreClient<Bookmark> for Bookmarks {
///     type Error = BookmarkError;
///
///     fn inner(&self) -> &RecordClient<Bookmark> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         BookmarkError(e.to_string())
///     }
/// }
///
/// async fn usage(bookmarks: Bookmarks) {
///     // exists(), get() and delete() are provided automatically
///     let _ = bookmarks.exists(1).await;
///     let _ = bookmarks.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait StoreClient<T: StoreRecord>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic RecordClient.
    fn inner(&self) -> &RecordClient<T>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Check whether a record is stored under `id`.
    #[tracing::instrument(skip(self))]
    async fn exists(&self, id: T::Id) -> Result<bool, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().exists(id).await.map_err(Self::map_error)
    }

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete a record by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<bool, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
