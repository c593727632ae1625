//! Theme entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use roomescape_core::types::ThemeId;

/// A themed escape room that can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Theme {
    /// Unique theme identifier.
    pub id: ThemeId,
    /// Theme name, unique across themes.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
}

impl Theme {
    /// Create a new theme with a fresh id.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            id: ThemeId::new(),
            name: name.into(),
            description: description.into(),
            thumbnail: thumbnail.into(),
        }
    }
}
