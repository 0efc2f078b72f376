use crate::model::{Character, CharacterId, Location, Origin};
use serde::{Deserialize, Serialize};

/// Persisted form of a favorited character.
///
/// # Record Store
/// This struct implements the [`StoreRecord`](sync_framework::StoreRecord) trait
/// (see [`favorite_store`](crate::favorite_store)), keyed by the character id.
/// A record existing in the store is what makes a character a favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: CharacterId,
    pub name: String,
    pub image: String,
    pub gender: String,
    pub species: String,
    pub status: String,
    pub origin: Origin,
    pub location: Location,
    pub episode_list: Vec<String>,
}

impl From<&Character> for FavoriteRecord {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            image: character.image.clone(),
            gender: character.gender.clone(),
            species: character.species.clone(),
            status: character.status.clone(),
            origin: character.origin.clone(),
            location: character.location.clone(),
            episode_list: character.episode_list.clone(),
        }
    }
}

impl FavoriteRecord {
    /// Turns the stored record back into the domain character.
    pub fn into_character(self) -> Character {
        Character {
            id: self.id,
            name: self.name,
            image: self.image,
            gender: self.gender,
            species: self.species,
            status: self.status,
            origin: self.origin,
            location: self.location,
            episode_list: self.episode_list,
        }
    }
}
