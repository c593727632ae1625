//! Reservation domain entities.

pub mod model;
pub mod slot;

pub use model::Reservation;
pub use slot::Slot;
