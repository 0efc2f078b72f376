//! # System Lifecycle
//!
//! Starting, wiring and stopping the store and the screen controllers.
//!
//! ## Late Binding
//!
//! Controllers are created without their collaborators and receive them when
//! started (`controller.run(context)`), the same way the store actor is
//! created first and its client handed to the screens afterwards:
//!
//! | Controller                  | Context                                  |
//! |-----------------------------|------------------------------------------|
//! | `CharacterListController`   | `Arc<dyn CatalogueService>`              |
//! | `CharacterDetailController` | `DetailContext` (catalogue + favorites)  |
//! | `FavoriteListController`    | `FavoriteClient`                         |
//!
//! ## Graceful Shutdown
//!
//! 1. **Close screens** - [`Screen::close`] drops the handle; the controller
//!    sees its command channel close, aborts its outstanding work and stops.
//! 2. **Stop the store** - [`CatalogueSystem::shutdown`] drops the last store
//!    client and waits for the store task.
//!
//! The dependency graph is acyclic (screens depend on the store, never the
//! other way round), so channel closure is enough to stop everything.

pub mod catalogue_system;

pub use catalogue_system::*;
