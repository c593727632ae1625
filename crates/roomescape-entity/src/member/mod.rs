//! Member domain entities.

pub mod model;
pub mod role;

pub use model::Member;
pub use role::MemberRole;
