//! Domain entities shown by the screens and kept by the favorite store.

pub mod character;
pub mod episode;
pub mod favorite;

pub use character::*;
pub use episode::*;
pub use favorite::*;
