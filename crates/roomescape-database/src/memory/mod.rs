//! In-memory repositories using a Tokio mutex, for tests and single-process
//! tooling.
//!
//! Rows are kept in insertion order, so "storage order" and queue order
//! behave as they do against PostgreSQL. Uniqueness rules of the SQL schema
//! are enforced on `save`.

mod catalog;
mod member;
mod reservation;
mod waiting;

pub use catalog::{MemoryReservationTimeRepository, MemoryThemeRepository};
pub use member::MemoryMemberRepository;
pub use reservation::MemoryReservationRepository;
pub use waiting::MemoryWaitingRepository;
