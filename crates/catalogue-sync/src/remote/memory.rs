//! # In-Memory Catalogue
//!
//! A [`CatalogueService`] backed by a fixed set of records. Pages are cut
//! from the character list the same way the REST API pages its listing:
//! 1-based, `page_size` records each, and a page past the end is a
//! not-found error.

use crate::api::{CharacterRecord, EpisodeRecord, LocationRecord, OriginRecord};
use crate::config::PAGE_SIZE;
use crate::remote::{CatalogueError, CatalogueService, CharacterPage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Fixture-backed catalogue.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogue {
    characters: Vec<CharacterRecord>,
    episodes: HashMap<String, EpisodeRecord>,
    page_size: usize,
    latency: Option<Duration>,
}

impl InMemoryCatalogue {
    /// Serves `characters` in the given order and `episodes` by their `url`.
    pub fn new(characters: Vec<CharacterRecord>, episodes: Vec<EpisodeRecord>) -> Self {
        let episodes = episodes
            .into_iter()
            .map(|episode| (episode.url.clone(), episode))
            .collect();
        Self {
            characters,
            episodes,
            page_size: PAGE_SIZE as usize,
            latency: None,
        }
    }

    /// Generates `character_count` characters, each appearing in
    /// `episodes_per_character` consecutive episodes.
    pub fn sample(character_count: usize, episodes_per_character: usize) -> Self {
        let episode_count = character_count + episodes_per_character;
        let episodes = (1..=episode_count)
            .map(|n| EpisodeRecord {
                id: n as i64,
                name: format!("Episode {n}"),
                air_date: format!("Week {n}"),
                code: format!("S{:02}E{:02}", (n - 1) / 10 + 1, (n - 1) % 10 + 1),
                url: format!("{BASE_URL}/episode/{n}"),
            })
            .collect();

        let characters = (1..=character_count)
            .map(|n| CharacterRecord {
                id: n as i64,
                name: format!("Character {n}"),
                status: if n % 3 == 0 { "Dead" } else { "Alive" }.to_string(),
                species: "Human".to_string(),
                gender: if n % 2 == 0 { "Female" } else { "Male" }.to_string(),
                origin: OriginRecord {
                    name: "Earth (C-137)".to_string(),
                    url: format!("{BASE_URL}/location/1"),
                },
                location: LocationRecord {
                    name: "Citadel of Ricks".to_string(),
                    url: format!("{BASE_URL}/location/3"),
                },
                image: format!("{BASE_URL}/character/avatar/{n}.jpeg"),
                episode_list: (n..n + episodes_per_character)
                    .map(|e| format!("{BASE_URL}/episode/{e}"))
                    .collect(),
            })
            .collect();

        Self::new(characters, episodes)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Delays every answer, to make loading states observable.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl CatalogueService for InMemoryCatalogue {
    async fn fetch_character_page(&self, page: u32) -> Result<CharacterPage, CatalogueError> {
        self.simulate_latency().await;
        if page == 0 {
            return Err(CatalogueError::Http {
                status: 400,
                message: "page must be at least 1".to_string(),
            });
        }

        let start = (page as usize - 1) * self.page_size;
        if start >= self.characters.len() && page > 1 {
            return Err(CatalogueError::NotFound(format!("character page {page}")));
        }
        let end = (start + self.page_size).min(self.characters.len());
        debug!(page, start, end, "Serving page");

        Ok(CharacterPage {
            items: self.characters[start..end].to_vec(),
            has_more: end < self.characters.len(),
        })
    }

    async fn fetch_episode(&self, reference: &str) -> Result<EpisodeRecord, CatalogueError> {
        self.simulate_latency().await;
        // The API accepts references with or without the trailing slash
        self.episodes
            .get(reference.trim_end_matches('/'))
            .cloned()
            .ok_or_else(|| CatalogueError::NotFound(reference.to_string()))
    }
}
