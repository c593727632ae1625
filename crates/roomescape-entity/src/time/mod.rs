//! Reservation time catalog entity.

pub mod model;

pub use model::ReservationTime;
