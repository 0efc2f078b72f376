//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter whose
//! level is taken from `RUST_LOG`.
//!
//! ```bash
//! # Store and controller lifecycle, page loads, favorite changes
//! RUST_LOG=info cargo run
//!
//! # Every store query and emitted navigation instruction
//! RUST_LOG=debug cargo run
//!
//! # Filter to one crate
//! RUST_LOG=catalogue_sync=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a short session looks like:
//!
//! ```text
//! INFO Store started record_type="FavoriteRecord"
//! INFO Controller started controller="character_list"
//! INFO Page loaded page=1 items=20 last_page=false
//! INFO Inserted record_type="FavoriteRecord" id=3 created=true size=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
