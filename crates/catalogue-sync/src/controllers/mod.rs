//! Screen controllers.
//!
//! Each controller is an actor: created with `new()`, which returns the
//! controller, a cloneable handle and the screen's instruction stream, then
//! started with `run(context)`. The controller task is the only place screen
//! state changes, and every background task it starts is tracked in its
//! [`DisposeBag`](sync_framework::DisposeBag). Dropping the last handle stops
//! the controller and aborts that work.

pub mod character_detail;
pub mod character_list;
pub mod favorite_list;

pub use character_detail::*;
pub use character_list::*;
pub use favorite_list::*;
