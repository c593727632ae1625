//! Theme catalog CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use roomescape_core::error::AppError;
use roomescape_core::types::ThemeId;
use roomescape_entity::theme::Theme;
use roomescape_service::catalog::ThemeRequest;

use super::Services;
use crate::output::{self, OutputFormat};

/// Arguments for theme commands
#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// Theme subcommand
    #[command(subcommand)]
    pub command: ThemeCommand,
}

/// Theme subcommands
#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Register a theme
    Add {
        /// Theme name
        #[arg(long)]
        name: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Thumbnail URL
        #[arg(long, default_value = "")]
        thumbnail: String,
    },
    /// List all themes
    List,
    /// Delete a theme
    Delete {
        /// Theme ID
        id: ThemeId,
    },
}

/// Theme display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ThemeRow {
    /// Theme ID
    id: String,
    /// Name
    name: String,
    /// Description
    description: String,
    /// Thumbnail
    thumbnail: String,
}

impl From<&Theme> for ThemeRow {
    fn from(t: &Theme) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name.clone(),
            description: t.description.clone(),
            thumbnail: t.thumbnail.clone(),
        }
    }
}

/// Execute theme commands
pub async fn execute(
    args: &ThemeArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ThemeCommand::Add {
            name,
            description,
            thumbnail,
        } => {
            let theme = services
                .themes
                .add_theme(ThemeRequest {
                    name: name.clone(),
                    description: description.clone(),
                    thumbnail: thumbnail.clone(),
                })
                .await?;
            output::print_item(&ThemeRow::from(&theme), format);
        }
        ThemeCommand::List => {
            let themes = services.themes.find_themes().await?;
            let rows: Vec<ThemeRow> = themes.iter().map(ThemeRow::from).collect();
            output::print_list(&rows, format);
        }
        ThemeCommand::Delete { id } => {
            services.themes.delete_theme(*id).await?;
            output::print_success(&format!("Theme {id} deleted"));
        }
    }

    Ok(())
}
