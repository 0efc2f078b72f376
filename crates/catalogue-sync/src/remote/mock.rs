//! # Mock Catalogue
//!
//! A [`CatalogueService`] whose requests are handed to the test. The test
//! pulls them from the receiver returned by [`create_mock_catalogue`] and
//! answers through the attached responder, so it controls both the answer and
//! the moment it arrives. A request is left pending for as long as the test
//! holds its responder; dropping the responder answers with
//! [`CatalogueError::Unavailable`].
//!
//! ```rust
//! use catalogue_sync::remote::mock::{create_mock_catalogue, expect_character_page};
//! use catalogue_sync::remote::{CatalogueService, CharacterPage};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (catalogue, mut requests) = create_mock_catalogue();
//!     let fetch = tokio::spawn(async move { catalogue.fetch_character_page(1).await });
//!
//!     let (page, responder) = expect_character_page(&mut requests).await.unwrap();
//!     assert_eq!(page, 1);
//!     responder.send(Ok(CharacterPage { items: vec![], has_more: false })).unwrap();
//!
//!     assert!(fetch.await.unwrap().unwrap().items.is_empty());
//! }
//! ```

use crate::api::EpisodeRecord;
use crate::remote::{CatalogueError, CatalogueService, CharacterPage};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// Responder for a pending request.
pub type Responder<T> = oneshot::Sender<Result<T, CatalogueError>>;

/// A request intercepted by [`MockCatalogue`].
#[derive(Debug)]
pub enum CatalogueRequest {
    CharacterPage {
        page: u32,
        respond_to: Responder<CharacterPage>,
    },
    Episode {
        reference: String,
        respond_to: Responder<EpisodeRecord>,
    },
}

/// Catalogue that forwards every request to the test.
#[derive(Debug, Clone)]
pub struct MockCatalogue {
    sender: mpsc::UnboundedSender<CatalogueRequest>,
}

#[async_trait]
impl CatalogueService for MockCatalogue {
    async fn fetch_character_page(&self, page: u32) -> Result<CharacterPage, CatalogueError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogueRequest::CharacterPage { page, respond_to })
            .map_err(|_| CatalogueError::Unavailable("mock receiver dropped".to_string()))?;
        response
            .await
            .map_err(|_| CatalogueError::Unavailable("mock responder dropped".to_string()))?
    }

    async fn fetch_episode(&self, reference: &str) -> Result<EpisodeRecord, CatalogueError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogueRequest::Episode {
                reference: reference.to_string(),
                respond_to,
            })
            .map_err(|_| CatalogueError::Unavailable("mock receiver dropped".to_string()))?;
        response
            .await
            .map_err(|_| CatalogueError::Unavailable("mock responder dropped".to_string()))?
    }
}

/// Creates a mock catalogue and the receiver its requests arrive on.
pub fn create_mock_catalogue() -> (MockCatalogue, mpsc::UnboundedReceiver<CatalogueRequest>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (MockCatalogue { sender }, receiver)
}

/// Helper to verify that the next request is a character page fetch
pub async fn expect_character_page(
    receiver: &mut mpsc::UnboundedReceiver<CatalogueRequest>,
) -> Option<(u32, Responder<CharacterPage>)> {
    match receiver.recv().await {
        Some(CatalogueRequest::CharacterPage { page, respond_to }) => Some((page, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next request is an episode fetch
pub async fn expect_episode(
    receiver: &mut mpsc::UnboundedReceiver<CatalogueRequest>,
) -> Option<(String, Responder<EpisodeRecord>)> {
    match receiver.recv().await {
        Some(CatalogueRequest::Episode {
            reference,
            respond_to,
        }) => Some((reference, respond_to)),
        _ => None,
    }
}
