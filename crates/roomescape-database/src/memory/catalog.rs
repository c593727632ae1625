//! In-memory theme and reservation time repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveTime;
use tokio::sync::Mutex;

use roomescape_core::error::AppError;
use roomescape_core::result::AppResult;
use roomescape_core::types::{ThemeId, TimeId};
use roomescape_entity::theme::Theme;
use roomescape_entity::time::ReservationTime;

use crate::repositories::{ReservationTimeRepository, ThemeRepository};

/// In-memory theme repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeRepository {
    rows: Arc<Mutex<Vec<Theme>>>,
}

impl MemoryThemeRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThemeRepository for MemoryThemeRepository {
    async fn find_all(&self) -> AppResult<Vec<Theme>> {
        let mut themes = self.rows.lock().await.clone();
        themes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(themes)
    }

    async fn find_by_id(&self, id: ThemeId) -> AppResult<Option<Theme>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|t| t.id == id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().any(|t| t.name == name))
    }

    async fn save(&self, theme: &Theme) -> AppResult<Theme> {
        let mut rows = self.rows.lock().await;
        if rows.iter().any(|t| t.id == theme.id || t.name == theme.name) {
            return Err(AppError::duplication(format!(
                "Theme '{}' already exists",
                theme.name
            )));
        }
        rows.push(theme.clone());
        Ok(theme.clone())
    }

    async fn delete_by_id(&self, id: ThemeId) -> AppResult<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }
}

/// In-memory reservation time repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryReservationTimeRepository {
    rows: Arc<Mutex<Vec<ReservationTime>>>,
}

impl MemoryReservationTimeRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationTimeRepository for MemoryReservationTimeRepository {
    async fn find_all(&self) -> AppResult<Vec<ReservationTime>> {
        let mut times = self.rows.lock().await.clone();
        times.sort_by_key(|t| t.start_at);
        Ok(times)
    }

    async fn find_by_id(&self, id: TimeId) -> AppResult<Option<ReservationTime>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|t| t.id == id).cloned())
    }

    async fn exists_by_start_at(&self, start_at: NaiveTime) -> AppResult<bool> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().any(|t| t.start_at == start_at))
    }

    async fn save(&self, time: &ReservationTime) -> AppResult<ReservationTime> {
        let mut rows = self.rows.lock().await;
        if rows
            .iter()
            .any(|t| t.id == time.id || t.start_at == time.start_at)
        {
            return Err(AppError::duplication(format!(
                "Time {} already exists",
                time.start_at
            )));
        }
        rows.push(time.clone());
        Ok(time.clone())
    }

    async fn delete_by_id(&self, id: TimeId) -> AppResult<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }
}
