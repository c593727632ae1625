//! Theme catalog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use roomescape_core::error::AppError;
use roomescape_core::result::AppResult;
use roomescape_core::types::ThemeId;
use roomescape_database::repositories::ThemeRepository;
use roomescape_entity::theme::Theme;

/// Request to register a new theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeRequest {
    /// Theme name, unique across the catalog.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Thumbnail URL.
    pub thumbnail: String,
}

/// Manages the theme catalog.
#[derive(Clone)]
pub struct ThemeService {
    /// Theme repository.
    theme_repo: Arc<dyn ThemeRepository>,
}

impl std::fmt::Debug for ThemeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeService").finish_non_exhaustive()
    }
}

impl ThemeService {
    /// Creates a new theme service.
    pub fn new(theme_repo: Arc<dyn ThemeRepository>) -> Self {
        Self { theme_repo }
    }

    /// Gets a theme by id.
    pub async fn get_theme(&self, id: ThemeId) -> AppResult<Theme> {
        self.theme_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Theme not found: {id}")))
    }

    /// Lists every theme.
    pub async fn find_themes(&self) -> AppResult<Vec<Theme>> {
        self.theme_repo.find_all().await
    }

    /// Registers a new theme.
    pub async fn add_theme(&self, req: ThemeRequest) -> AppResult<Theme> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Theme name cannot be empty"));
        }
        if self.theme_repo.exists_by_name(name).await? {
            return Err(AppError::duplication(format!(
                "Theme '{name}' already exists"
            )));
        }

        let theme = Theme::new(name, req.description, req.thumbnail);
        let theme = self.theme_repo.save(&theme).await?;

        info!(theme_id = %theme.id, name = %theme.name, "Theme added");

        Ok(theme)
    }

    /// Removes a theme.
    pub async fn delete_theme(&self, id: ThemeId) -> AppResult<()> {
        if !self.theme_repo.delete_by_id(id).await? {
            return Err(AppError::not_found(format!("Theme not found: {id}")));
        }

        info!(theme_id = %id, "Theme deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomescape_core::error::ErrorKind;
    use roomescape_database::memory::MemoryThemeRepository;

    fn service() -> ThemeService {
        ThemeService::new(Arc::new(MemoryThemeRepository::new()))
    }

    fn request(name: &str) -> ThemeRequest {
        ThemeRequest {
            name: name.to_string(),
            description: "locked in a lighthouse".to_string(),
            thumbnail: "https://img.example.com/lighthouse.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let service = service();
        let theme = service.add_theme(request("Lighthouse")).await.unwrap();

        let found = service.get_theme(theme.id).await.unwrap();
        assert_eq!(found.name, "Lighthouse");
        assert_eq!(service.find_themes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_and_duplicate_names_rejected() {
        let service = service();
        service.add_theme(request("Lighthouse")).await.unwrap();

        let blank = service.add_theme(request("   ")).await.unwrap_err();
        assert_eq!(blank.kind, ErrorKind::Validation);

        let dup = service.add_theme(request("Lighthouse")).await.unwrap_err();
        assert_eq!(dup.kind, ErrorKind::Duplication);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let err = service().delete_theme(ThemeId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
