//! Raw records as served by the catalogue's REST API.
//!
//! Field names follow the JSON payload; `serde` ignores fields the client
//! does not use (`type`, `created`, the episode's `characters`, ...).
//! Identifiers are kept signed so that the mapper, not the decoder, decides
//! what a valid id is.

use serde::{Deserialize, Serialize};

/// Paging metadata attached to every list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page of the `/character` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPageRecord {
    pub info: PageInfo,
    pub results: Vec<CharacterRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
    pub origin: OriginRecord,
    pub location: LocationRecord,
    pub image: String,
    #[serde(rename = "episode")]
    pub episode_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginRecord {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub id: i64,
    pub name: String,
    pub air_date: String,
    #[serde(rename = "episode")]
    pub code: String,
    pub url: String,
}
