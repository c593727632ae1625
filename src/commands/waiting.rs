//! Waitlist CLI commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use roomescape_core::error::AppError;
use roomescape_core::types::{ThemeId, TimeId, WaitingId};
use roomescape_entity::waiting::{Waiting, WaitingWithRank};
use roomescape_service::waiting::WaitingRequest;

use super::Services;
use crate::output::{self, OutputFormat};

/// Arguments for waiting commands
#[derive(Debug, Args)]
pub struct WaitingArgs {
    /// Waiting subcommand
    #[command(subcommand)]
    pub command: WaitingCommand,
}

/// Waiting subcommands
#[derive(Debug, Subcommand)]
pub enum WaitingCommand {
    /// Join the queue for a booked slot
    Add {
        /// Login token
        #[arg(long)]
        token: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Start time ID
        #[arg(long)]
        time_id: TimeId,
        /// Theme ID
        #[arg(long)]
        theme_id: ThemeId,
    },
    /// List all waitings
    List,
    /// Show the logged-in member's waitings with their rank
    Mine {
        /// Login token
        #[arg(long)]
        token: String,
    },
    /// Leave a queue
    Withdraw {
        /// Login token
        #[arg(long)]
        token: String,
        /// Waiting ID
        id: WaitingId,
    },
}

/// Waiting display row for table output
#[derive(Debug, Serialize, Tabled)]
struct WaitingRow {
    /// Waiting ID
    id: String,
    /// Date
    date: String,
    /// Start
    start_at: String,
    /// Theme
    theme: String,
    /// Member
    member: String,
    /// Rank (0 is next in line)
    rank: String,
}

impl WaitingRow {
    fn new(w: &Waiting, rank: Option<u64>) -> Self {
        Self {
            id: w.id.to_string(),
            date: w.date.to_string(),
            start_at: w.time.start_at.format("%H:%M").to_string(),
            theme: w.theme.name.clone(),
            member: w.member.name.clone(),
            rank: rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl From<&WaitingWithRank> for WaitingRow {
    fn from(w: &WaitingWithRank) -> Self {
        Self::new(&w.waiting, Some(w.rank))
    }
}

/// Execute waiting commands
pub async fn execute(
    args: &WaitingArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        WaitingCommand::Add {
            token,
            date,
            time_id,
            theme_id,
        } => {
            let ctx = services.login(token).await?;
            let waiting = services
                .waitings
                .add_waiting(
                    WaitingRequest {
                        date: *date,
                        time_id: *time_id,
                        theme_id: *theme_id,
                    },
                    &ctx,
                )
                .await?;
            output::print_item(&WaitingRow::new(&waiting, None), format);
        }
        WaitingCommand::List => {
            let waitings = services.waitings.find_waitings().await?;
            let rows: Vec<WaitingRow> = waitings.iter().map(|w| WaitingRow::new(w, None)).collect();
            output::print_list(&rows, format);
        }
        WaitingCommand::Mine { token } => {
            let ctx = services.login(token).await?;
            let ranked = services.waitings.find_waitings_by_member(ctx.member_id).await?;
            let rows: Vec<WaitingRow> = ranked.iter().map(WaitingRow::from).collect();
            output::print_list(&rows, format);
        }
        WaitingCommand::Withdraw { token, id } => {
            let ctx = services.login(token).await?;
            services.waitings.delete_by_id(*id, &ctx).await?;
            output::print_success(&format!("Waiting {id} withdrawn"));
        }
    }

    Ok(())
}
