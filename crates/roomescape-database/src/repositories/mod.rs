//! Repository contracts and their PostgreSQL implementations.

pub mod member;
pub mod reservation;
mod rows;
pub mod theme;
pub mod time;
pub mod waiting;

pub use member::{MemberRepository, PgMemberRepository};
pub use reservation::{PgReservationRepository, ReservationRepository};
pub use theme::{PgThemeRepository, ThemeRepository};
pub use time::{PgReservationTimeRepository, ReservationTimeRepository};
pub use waiting::{PgWaitingRepository, WaitingRepository};
