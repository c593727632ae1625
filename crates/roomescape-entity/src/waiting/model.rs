//! Waiting entity model.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use roomescape_core::types::{MemberId, WaitingId};

use crate::member::Member;
use crate::reservation::Slot;
use crate::theme::Theme;
use crate::time::ReservationTime;

/// A member queued for an already reserved slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waiting {
    /// Unique waiting identifier (UUIDv7, creation ordered).
    pub id: WaitingId,
    /// Requested date.
    pub date: NaiveDate,
    /// Requested start time.
    pub time: ReservationTime,
    /// Requested theme.
    pub theme: Theme,
    /// Queued member.
    pub member: Member,
    /// When the member joined the queue.
    pub created_at: DateTime<Utc>,
}

impl Waiting {
    /// Create a new waiting entry stamped with the current time.
    pub fn new(date: NaiveDate, time: ReservationTime, theme: Theme, member: Member) -> Self {
        Self {
            id: WaitingId::now_v7(),
            date,
            time,
            theme,
            member,
            created_at: Utc::now(),
        }
    }

    /// The slot this entry queues for.
    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.time.id, self.theme.id)
    }

    /// The instant the requested slot begins.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time.start_at)
    }

    /// Whether the slot starts at or before `now`.
    pub fn is_not_after(&self, now: NaiveDateTime) -> bool {
        self.start() <= now
    }

    /// Whether `member_id` owns this entry.
    pub fn is_owned_by(&self, member_id: MemberId) -> bool {
        self.member.id == member_id
    }
}

/// A waiting entry together with its queue position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingWithRank {
    /// The waiting entry.
    pub waiting: Waiting,
    /// Number of entries for the same slot created earlier (0 = next in line).
    pub rank: u64,
}

impl WaitingWithRank {
    /// Pair a waiting with its rank.
    pub fn new(waiting: Waiting, rank: u64) -> Self {
        Self { waiting, rank }
    }
}
