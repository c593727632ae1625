//! # roomescape-core
//!
//! Core crate for the room escape reservation backend. Contains the
//! configuration schema, typed identifiers, the clock abstraction used for
//! past-time validation, and the unified error system.
//!
//! This crate has **no** internal dependencies on other roomescape crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
