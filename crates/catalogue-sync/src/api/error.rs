//! Error types for record mapping.

use thiserror::Error;

/// A remote record that cannot be turned into a domain entity.
///
/// Mapping never substitutes defaults: a malformed record is reported, not
/// repaired.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MappingError {
    /// The record carries an id that is zero, negative or out of range.
    #[error("Invalid {entity} id: {id}")]
    InvalidId { entity: &'static str, id: i64 },

    /// A required text field is empty.
    #[error("Missing {field} on {entity} {id}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
        id: i64,
    },

    /// An episode reference is blank.
    #[error("Empty episode reference on character {0}")]
    EmptyReference(i64),
}
