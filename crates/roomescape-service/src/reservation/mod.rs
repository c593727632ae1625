//! Reservation booking, search, and cancellation with promotion.

pub mod dto;
pub mod service;

pub use dto::{
    AdminReservationRequest, MemberReservation, ReservationRequest, ReservationSearch,
    ReservationStatus,
};
pub use service::ReservationService;
