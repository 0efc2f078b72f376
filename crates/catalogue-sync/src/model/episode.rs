use serde::{Deserialize, Serialize};

/// An episode a character appears in. Fetched lazily from the references
/// embedded in [`Character::episode_list`](crate::model::Character::episode_list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    /// Season/episode code, e.g. `S01E01`.
    pub code: String,
    pub url: String,
}
