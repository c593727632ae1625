//! Bookable start time CLI commands.

use chrono::NaiveTime;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use roomescape_core::error::AppError;
use roomescape_core::types::TimeId;
use roomescape_entity::time::ReservationTime;
use roomescape_service::catalog::TimeRequest;

use super::Services;
use crate::output::{self, OutputFormat};

/// Arguments for time commands
#[derive(Debug, Args)]
pub struct TimeArgs {
    /// Time subcommand
    #[command(subcommand)]
    pub command: TimeCommand,
}

/// Time subcommands
#[derive(Debug, Subcommand)]
pub enum TimeCommand {
    /// Open a start time (HH:MM)
    Add {
        /// Start time of day
        start_at: NaiveTime,
    },
    /// List all start times
    List,
    /// Delete a start time
    Delete {
        /// Time ID
        id: TimeId,
    },
}

/// Time display row for table output
#[derive(Debug, Serialize, Tabled)]
struct TimeRow {
    /// Time ID
    id: String,
    /// Start
    start_at: String,
}

impl From<&ReservationTime> for TimeRow {
    fn from(t: &ReservationTime) -> Self {
        Self {
            id: t.id.to_string(),
            start_at: t.start_at.format("%H:%M").to_string(),
        }
    }
}

/// Execute time commands
pub async fn execute(
    args: &TimeArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        TimeCommand::Add { start_at } => {
            let time = services
                .times
                .add_time(TimeRequest {
                    start_at: *start_at,
                })
                .await?;
            output::print_item(&TimeRow::from(&time), format);
        }
        TimeCommand::List => {
            let times = services.times.find_times().await?;
            let rows: Vec<TimeRow> = times.iter().map(TimeRow::from).collect();
            output::print_list(&rows, format);
        }
        TimeCommand::Delete { id } => {
            services.times.delete_time(*id).await?;
            output::print_success(&format!("Reservation time {id} deleted"));
        }
    }

    Ok(())
}
