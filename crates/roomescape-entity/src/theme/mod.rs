//! Theme catalog entity.

pub mod model;

pub use model::Theme;
