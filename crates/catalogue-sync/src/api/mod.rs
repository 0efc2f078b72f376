//! Remote record shapes and their mapping into the domain model.

pub mod error;
pub mod mapper;
pub mod records;

pub use error::*;
pub use records::*;
