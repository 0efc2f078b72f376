use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl From<u32> for CharacterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A character from the catalogue, as shown on list and detail screens.
///
/// Built once from a remote record by the [`mapper`](crate::api::mapper) and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub image: String,
    pub gender: String,
    pub species: String,
    pub status: String,
    pub origin: Origin,
    pub location: Location,
    /// Episode references in broadcast order, already normalized.
    pub episode_list: Vec<String>,
}

/// Where a character comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub name: String,
    pub url: String,
}

/// Last known location of a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub url: String,
}
