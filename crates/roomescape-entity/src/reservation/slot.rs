//! Slot key: the bookable unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use roomescape_core::types::{ThemeId, TimeId};

/// The `(date, time, theme)` tuple identifying a bookable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Booking date.
    pub date: NaiveDate,
    /// Start time reference.
    pub time_id: TimeId,
    /// Theme reference.
    pub theme_id: ThemeId,
}

impl Slot {
    /// Create a slot key.
    pub fn new(date: NaiveDate, time_id: TimeId, theme_id: ThemeId) -> Self {
        Self {
            date,
            time_id,
            theme_id,
        }
    }
}
