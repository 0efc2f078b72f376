//! Type-safe wrappers around [`RecordClient`](sync_framework::RecordClient).

pub mod favorite_client;

pub use favorite_client::*;
