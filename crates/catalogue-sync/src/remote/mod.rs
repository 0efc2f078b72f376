//! # Remote Catalogue
//!
//! The contract the controllers use to reach the public catalogue. How the
//! bytes travel is up to the implementation; this crate ships two:
//!
//! - [`memory::InMemoryCatalogue`] serves fixture records, for the demo binary
//!   and end-to-end tests.
//! - [`mock::MockCatalogue`] hands every request to the test, which answers it
//!   explicitly (and decides when).

pub mod error;
pub mod memory;
pub mod mock;

pub use error::*;

use crate::api::{CharacterPageRecord, CharacterRecord, EpisodeRecord};
use async_trait::async_trait;

/// One page of raw character records.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterPage {
    pub items: Vec<CharacterRecord>,
    /// Whether the catalogue reports a page after this one.
    pub has_more: bool,
}

impl From<CharacterPageRecord> for CharacterPage {
    fn from(page: CharacterPageRecord) -> Self {
        Self {
            has_more: page.info.next.is_some(),
            items: page.results,
        }
    }
}

/// Read access to the remote catalogue.
///
/// Both calls are asynchronous and answer exactly once, with a value or an
/// error. Callers never retry on their own.
#[async_trait]
pub trait CatalogueService: Send + Sync {
    /// Fetch page `page` (1-based) of the character listing.
    async fn fetch_character_page(&self, page: u32) -> Result<CharacterPage, CatalogueError>;

    /// Fetch the episode behind a reference URL taken from a character.
    async fn fetch_episode(&self, reference: &str) -> Result<EpisodeRecord, CatalogueError>;
}
