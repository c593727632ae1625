//! Theme and time-slot catalog services.

pub mod theme;
pub mod time;

pub use theme::{ThemeRequest, ThemeService};
pub use time::{ReservationTimeService, TimeRequest};
