//! # roomescape-service
//!
//! Business logic for the room escape backend. Each service orchestrates
//! repositories and collaborating services to implement one use case area.
//!
//! Services follow constructor injection: repositories arrive as
//! `Arc<dyn ...Repository>` so the same service runs against PostgreSQL or
//! the in-memory stores.

pub mod catalog;
pub mod context;
pub mod member;
pub mod reservation;
pub mod waiting;

pub use catalog::{ReservationTimeService, ThemeService};
pub use context::RequestContext;
pub use member::MemberService;
pub use reservation::ReservationService;
pub use waiting::WaitingService;
