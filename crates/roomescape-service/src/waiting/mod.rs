//! Waitlist management.

pub mod service;

pub use service::{WaitingRequest, WaitingService};
