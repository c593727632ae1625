//! # roomescape-entity
//!
//! Domain entity models for the room escape backend. Catalog entities and
//! members map one-to-one onto table rows and derive `sqlx::FromRow`;
//! reservations and waitings carry their resolved references and are
//! assembled from joined rows by the database crate.

pub mod member;
pub mod reservation;
pub mod theme;
pub mod time;
pub mod waiting;
