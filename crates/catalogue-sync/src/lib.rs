//! # Catalogue Sync
//!
//! Client-side core for a public character catalogue: the logic behind the
//! character list, character detail and favorites screens, without the
//! screens themselves.
//!
//! ## Modules
//!
//! - **[api]**: remote record shapes and the pure [`mapper`](api::mapper) into domain types.
//! - **[model]**: domain entities ([`Character`](model::Character), [`Episode`](model::Episode), [`FavoriteRecord`](model::FavoriteRecord)).
//! - **[remote]**: the [`CatalogueService`](remote::CatalogueService) contract, an in-memory implementation and a mock.
//! - **[favorite_store]** / **[clients]**: favorites kept by a record actor, behind [`FavoriteClient`](clients::FavoriteClient).
//! - **[controllers]**: one actor per screen, reporting [`NavigationInstruction`](navigation::NavigationInstruction)s.
//! - **[lifecycle]**: [`CatalogueSystem`](lifecycle::CatalogueSystem) wires it all together.
//!
//! ## Testing
//!
//! See [`remote::mock`] and [`sync_framework::mock`] for stand-ins that let a
//! test decide what the catalogue and the store answer, and when.

pub mod api;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod error;
pub mod favorite_store;
pub mod lifecycle;
pub mod model;
pub mod navigation;
pub mod remote;
