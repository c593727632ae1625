//! Reservation entity model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use roomescape_core::types::{MemberId, ReservationId};

use super::slot::Slot;
use crate::member::Member;
use crate::theme::Theme;
use crate::time::ReservationTime;

/// A member's booking of one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique reservation identifier. Preserved across promotion.
    pub id: ReservationId,
    /// Booking date.
    pub date: NaiveDate,
    /// Booked start time.
    pub time: ReservationTime,
    /// Booked theme.
    pub theme: Theme,
    /// Owning member.
    pub member: Member,
}

impl Reservation {
    /// Create a new reservation with a fresh id.
    pub fn new(date: NaiveDate, time: ReservationTime, theme: Theme, member: Member) -> Self {
        Self {
            id: ReservationId::new(),
            date,
            time,
            theme,
            member,
        }
    }

    /// The same booking handed to another member. Id, date, time and theme
    /// are kept.
    pub fn transfer_to(&self, member: Member) -> Self {
        Self {
            id: self.id,
            date: self.date,
            time: self.time.clone(),
            theme: self.theme.clone(),
            member,
        }
    }

    /// The slot this reservation occupies.
    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.time.id, self.theme.id)
    }

    /// The instant the booked slot begins.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time.start_at)
    }

    /// Whether the slot starts at or before `now`.
    pub fn is_not_after(&self, now: NaiveDateTime) -> bool {
        self.start() <= now
    }

    /// Whether the date falls within `[from, to]`. A missing bound is open.
    pub fn is_between_inclusive(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
        from.is_none_or(|from| from <= self.date) && to.is_none_or(|to| self.date <= to)
    }

    /// Whether `member_id` owns this reservation.
    pub fn is_owned_by(&self, member_id: MemberId) -> bool {
        self.member.id == member_id
    }
}
