//! Reservation time entity model.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use roomescape_core::types::TimeId;

/// A bookable start time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ReservationTime {
    /// Unique time identifier.
    pub id: TimeId,
    /// Start time of day.
    pub start_at: NaiveTime,
}

impl ReservationTime {
    /// Create a new time slot with a fresh id.
    pub fn new(start_at: NaiveTime) -> Self {
        Self {
            id: TimeId::new(),
            start_at,
        }
    }
}
