//! Waiting-list domain entities.

pub mod model;

pub use model::{Waiting, WaitingWithRank};
