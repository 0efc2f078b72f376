//! Pure projections from remote records to domain entities.
//!
//! Every function is synchronous and free of I/O. Episode references get a
//! trailing `/` appended, unconditionally, so `https://x/1` becomes
//! `https://x/1/` (and `https://x/1/` becomes `https://x/1//`).

use crate::api::error::MappingError;
use crate::api::records::{CharacterRecord, EpisodeRecord, LocationRecord, OriginRecord};
use crate::model::{Character, CharacterId, Episode, Location, Origin};

/// Maps a whole page of character records, failing on the first bad record.
pub fn to_character_domain_list(
    records: Vec<CharacterRecord>,
) -> Result<Vec<Character>, MappingError> {
    records.into_iter().map(to_character_domain).collect()
}

pub fn to_character_domain(record: CharacterRecord) -> Result<Character, MappingError> {
    let id = positive_id("character", record.id)?;
    if record.name.trim().is_empty() {
        return Err(MappingError::MissingField {
            entity: "character",
            field: "name",
            id: record.id,
        });
    }

    let episode_list = record
        .episode_list
        .iter()
        .map(|episode| to_episode_reference(record.id, episode))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Character {
        id: CharacterId(id),
        name: record.name,
        image: record.image,
        gender: record.gender,
        species: record.species,
        status: record.status,
        origin: to_origin_domain(record.origin),
        location: to_location_domain(record.location),
        episode_list,
    })
}

pub fn to_origin_domain(record: OriginRecord) -> Origin {
    Origin {
        name: record.name,
        url: record.url,
    }
}

pub fn to_location_domain(record: LocationRecord) -> Location {
    Location {
        name: record.name,
        url: record.url,
    }
}

pub fn to_episode_domain(record: EpisodeRecord) -> Result<Episode, MappingError> {
    let id = positive_id("episode", record.id)?;
    if record.name.trim().is_empty() {
        return Err(MappingError::MissingField {
            entity: "episode",
            field: "name",
            id: record.id,
        });
    }

    Ok(Episode {
        id,
        name: record.name,
        air_date: record.air_date,
        code: record.code,
        url: record.url,
    })
}

fn to_episode_reference(character_id: i64, episode: &str) -> Result<String, MappingError> {
    if episode.trim().is_empty() {
        return Err(MappingError::EmptyReference(character_id));
    }
    Ok(format!("{episode}/"))
}

fn positive_id(entity: &'static str, id: i64) -> Result<u32, MappingError> {
    u32::try_from(id)
        .ok()
        .filter(|id| *id > 0)
        .ok_or(MappingError::InvalidId { entity, id })
}
