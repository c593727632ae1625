//! # roomescape-database
//!
//! Persistence contracts for the room escape backend and their two
//! implementations: PostgreSQL repositories over a shared `sqlx` pool, and
//! in-memory repositories (feature `memory`) used by tests.

pub mod connection;
pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod repositories;

pub use connection::DatabasePool;
