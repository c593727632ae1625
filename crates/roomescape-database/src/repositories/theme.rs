//! Theme repository contract and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use roomescape_core::result::AppResult;
use roomescape_core::types::ThemeId;
use roomescape_entity::theme::Theme;

use crate::error::map_sqlx;

/// Persistence contract for the theme catalog.
#[async_trait]
pub trait ThemeRepository: Send + Sync + 'static {
    /// All themes.
    async fn find_all(&self) -> AppResult<Vec<Theme>>;

    /// Find a theme by primary key.
    async fn find_by_id(&self, id: ThemeId) -> AppResult<Option<Theme>>;

    /// Whether a theme with this name exists.
    async fn exists_by_name(&self, name: &str) -> AppResult<bool>;

    /// Insert a theme.
    async fn save(&self, theme: &Theme) -> AppResult<Theme>;

    /// Delete a theme. Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: ThemeId) -> AppResult<bool>;
}

/// PostgreSQL-backed theme repository.
#[derive(Debug, Clone)]
pub struct PgThemeRepository {
    pool: PgPool,
}

impl PgThemeRepository {
    /// Create a new theme repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThemeRepository for PgThemeRepository {
    async fn find_all(&self) -> AppResult<Vec<Theme>> {
        sqlx::query_as::<_, Theme>("SELECT * FROM themes ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list themes", e))
    }

    async fn find_by_id(&self, id: ThemeId) -> AppResult<Option<Theme>> {
        sqlx::query_as::<_, Theme>("SELECT * FROM themes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find theme", e))
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM themes WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to check theme name", e))
    }

    async fn save(&self, theme: &Theme) -> AppResult<Theme> {
        sqlx::query_as::<_, Theme>(
            "INSERT INTO themes (id, name, description, thumbnail) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(theme.id)
        .bind(&theme.name)
        .bind(&theme.description)
        .bind(&theme.thumbnail)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to create theme", e))
    }

    async fn delete_by_id(&self, id: ThemeId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM themes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to delete theme", e))?;
        Ok(result.rows_affected() > 0)
    }
}
