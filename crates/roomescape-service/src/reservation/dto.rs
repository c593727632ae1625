//! Reservation request and view types.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use roomescape_core::types::{MemberId, ThemeId, TimeId};
use roomescape_entity::reservation::Reservation;
use roomescape_entity::waiting::WaitingWithRank;

/// Request by a member to book a slot for themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Date of the slot.
    pub date: NaiveDate,
    /// Start time of the slot.
    pub time_id: TimeId,
    /// Theme of the slot.
    pub theme_id: ThemeId,
}

/// Request by staff to book a slot on behalf of a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminReservationRequest {
    /// Date of the slot.
    pub date: NaiveDate,
    /// Start time of the slot.
    pub time_id: TimeId,
    /// Theme of the slot.
    pub theme_id: ThemeId,
    /// Member the reservation is made for.
    pub member_id: MemberId,
}

/// Filter for the admin reservation search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationSearch {
    /// Theme to search within.
    pub theme_id: ThemeId,
    /// Member whose reservations to return.
    pub member_id: MemberId,
    /// Earliest date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub date_to: Option<NaiveDate>,
}

/// Whether an itinerary row is a held reservation or a queue position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReservationStatus {
    /// The member holds the slot.
    Reserved,
    /// The member is queued; `rank` 0 is next in line.
    Waiting {
        /// Number of members ahead in the queue.
        rank: u64,
    },
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reserved => write!(f, "reserved"),
            Self::Waiting { rank } => write!(f, "waiting #{rank}"),
        }
    }
}

/// One row of a member's itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberReservation {
    /// Reservation or waiting id.
    pub id: uuid::Uuid,
    /// Theme name.
    pub theme: String,
    /// Slot date.
    pub date: NaiveDate,
    /// Slot start time.
    pub start_at: NaiveTime,
    /// Reservation status.
    #[serde(flatten)]
    pub status: ReservationStatus,
}

impl From<Reservation> for MemberReservation {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id.into_uuid(),
            theme: reservation.theme.name,
            date: reservation.date,
            start_at: reservation.time.start_at,
            status: ReservationStatus::Reserved,
        }
    }
}

impl From<WaitingWithRank> for MemberReservation {
    fn from(ranked: WaitingWithRank) -> Self {
        let waiting = ranked.waiting;
        Self {
            id: waiting.id.into_uuid(),
            theme: waiting.theme.name,
            date: waiting.date,
            start_at: waiting.time.start_at,
            status: ReservationStatus::Waiting { rank: ranked.rank },
        }
    }
}
