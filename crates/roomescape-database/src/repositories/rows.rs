//! Flat joined rows for reservations and waitings.
//!
//! Both tables store only foreign keys; reads join the catalog and member
//! tables and these rows fold the prefixed columns back into entities.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

use roomescape_core::types::{MemberId, ReservationId, ThemeId, TimeId, WaitingId};
use roomescape_entity::member::{Member, MemberRole};
use roomescape_entity::reservation::Reservation;
use roomescape_entity::theme::Theme;
use roomescape_entity::time::ReservationTime;
use roomescape_entity::waiting::{Waiting, WaitingWithRank};

/// Column list shared by every reservation/waiting read. `x` is the aliased
/// base table.
pub(crate) const JOINED_COLUMNS: &str = "\
    x.id, x.date, \
    t.id AS time_id, t.start_at AS time_start_at, \
    th.id AS theme_id, th.name AS theme_name, th.description AS theme_description, \
    th.thumbnail AS theme_thumbnail, \
    m.id AS member_id, m.name AS member_name, m.email AS member_email, \
    m.password_hash AS member_password_hash, m.role AS member_role";

/// Joins shared by every reservation/waiting read.
pub(crate) const JOINS: &str = "\
    JOIN reservation_times t ON t.id = x.time_id \
    JOIN themes th ON th.id = x.theme_id \
    JOIN members m ON m.id = x.member_id";

#[derive(Debug, FromRow)]
struct Refs {
    time_id: TimeId,
    time_start_at: NaiveTime,
    theme_id: ThemeId,
    theme_name: String,
    theme_description: String,
    theme_thumbnail: String,
    member_id: MemberId,
    member_name: String,
    member_email: String,
    member_password_hash: String,
    member_role: MemberRole,
}

impl Refs {
    fn split(self) -> (ReservationTime, Theme, Member) {
        (
            ReservationTime {
                id: self.time_id,
                start_at: self.time_start_at,
            },
            Theme {
                id: self.theme_id,
                name: self.theme_name,
                description: self.theme_description,
                thumbnail: self.theme_thumbnail,
            },
            Member {
                id: self.member_id,
                name: self.member_name,
                email: self.member_email,
                password_hash: self.member_password_hash,
                role: self.member_role,
            },
        )
    }
}

/// Joined reservation row.
#[derive(Debug, FromRow)]
pub(crate) struct ReservationRow {
    id: ReservationId,
    date: NaiveDate,
    #[sqlx(flatten)]
    refs: Refs,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        let (time, theme, member) = row.refs.split();
        Reservation {
            id: row.id,
            date: row.date,
            time,
            theme,
            member,
        }
    }
}

/// Joined waiting row.
#[derive(Debug, FromRow)]
pub(crate) struct WaitingRow {
    id: WaitingId,
    date: NaiveDate,
    created_at: DateTime<Utc>,
    #[sqlx(flatten)]
    refs: Refs,
}

impl From<WaitingRow> for Waiting {
    fn from(row: WaitingRow) -> Self {
        let (time, theme, member) = row.refs.split();
        Waiting {
            id: row.id,
            date: row.date,
            time,
            theme,
            member,
            created_at: row.created_at,
        }
    }
}

/// Joined waiting row carrying its computed rank.
#[derive(Debug, FromRow)]
pub(crate) struct RankedWaitingRow {
    rank: i64,
    #[sqlx(flatten)]
    waiting: WaitingRow,
}

impl From<RankedWaitingRow> for WaitingWithRank {
    fn from(row: RankedWaitingRow) -> Self {
        WaitingWithRank::new(row.waiting.into(), u64::try_from(row.rank).unwrap_or(0))
    }
}
