//! Reservation CLI commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use roomescape_core::error::AppError;
use roomescape_core::types::{MemberId, ReservationId, ThemeId, TimeId};
use roomescape_entity::reservation::Reservation;
use roomescape_service::reservation::{
    AdminReservationRequest, MemberReservation, ReservationRequest, ReservationSearch,
};

use super::Services;
use crate::output::{self, OutputFormat};

/// Arguments for reservation commands
#[derive(Debug, Args)]
pub struct ReservationArgs {
    /// Reservation subcommand
    #[command(subcommand)]
    pub command: ReservationCommand,
}

/// Reservation subcommands
#[derive(Debug, Subcommand)]
pub enum ReservationCommand {
    /// Book a slot for the logged-in member
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
    /// Book a slot on behalf of a member
    AdminAdd {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Start time ID
        #[arg(long)]
        time_id: TimeId,
        /// Theme ID
        #[arg(long)]
        theme_id: ThemeId,
        /// Member ID
        #[arg(long)]
        member_id: MemberId,
    },
    /// List all reservations
    List,
    /// Search one member's reservations for a theme
    Search {
        /// Theme ID
        #[arg(long)]
        theme_id: ThemeId,
        /// Member ID
        #[arg(long)]
        member_id: MemberId,
        /// Earliest date, inclusive
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date, inclusive
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show the logged-in member's reservations and waitings
    Mine {
        /// Login token
        #[arg(long)]
        token: String,
    },
    /// Cancel a reservation
    Cancel {
        /// Login token
        #[arg(long)]
        token: String,
        /// Reservation ID
        id: ReservationId,
    },
}

/// Reservation display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ReservationRow {
    /// Reservation ID
    id: String,
    /// Date
    date: String,
    /// Start
    start_at: String,
    /// Theme
    theme: String,
    /// Member
    member: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            date: r.date.to_string(),
            start_at: r.time.start_at.format("%H:%M").to_string(),
            theme: r.theme.name.clone(),
            member: r.member.name.clone(),
        }
    }
}

/// Itinerary display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ItineraryRow {
    /// Reservation or waiting ID
    id: String,
    /// Date
    date: String,
    /// Start
    start_at: String,
    /// Theme
    theme: String,
    /// Status
    status: String,
}

impl From<&MemberReservation> for ItineraryRow {
    fn from(r: &MemberReservation) -> Self {
        Self {
            id: r.id.to_string(),
            date: r.date.to_string(),
            start_at: r.start_at.format("%H:%M").to_string(),
            theme: r.theme.clone(),
            status: r.status.to_string(),
        }
    }
}

/// Execute reservation commands
pub async fn execute(
    args: &ReservationArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ReservationCommand::Add {
            token,
            date,
            time_id,
            theme_id,
        } => {
            let ctx = services.login(token).await?;
            let reservation = services
                .reservations
                .add_reservation(
                    ReservationRequest {
                        date: *date,
                        time_id: *time_id,
                        theme_id: *theme_id,
                    },
                    &ctx,
                )
                .await?;
            output::print_item(&ReservationRow::from(&reservation), format);
        }
        ReservationCommand::AdminAdd {
            date,
            time_id,
            theme_id,
            member_id,
        } => {
            let reservation = services
                .reservations
                .add_reservation_by_admin(AdminReservationRequest {
                    date: *date,
                    time_id: *time_id,
                    theme_id: *theme_id,
                    member_id: *member_id,
                })
                .await?;
            output::print_item(&ReservationRow::from(&reservation), format);
        }
        ReservationCommand::List => {
            let reservations = services.reservations.find_reservations().await?;
            let rows: Vec<ReservationRow> = reservations.iter().map(ReservationRow::from).collect();
            output::print_list(&rows, format);
        }
        ReservationCommand::Search {
            theme_id,
            member_id,
            from,
            to,
        } => {
            let reservations = services
                .reservations
                .search_reservations(ReservationSearch {
                    theme_id: *theme_id,
                    member_id: *member_id,
                    date_from: *from,
                    date_to: *to,
                })
                .await?;
            let rows: Vec<ReservationRow> = reservations.iter().map(ReservationRow::from).collect();
            output::print_list(&rows, format);
        }
        ReservationCommand::Mine { token } => {
            let ctx = services.login(token).await?;
            let itinerary = services.reservations.find_reservations_by_member(&ctx).await?;
            match format {
                OutputFormat::Table => {
                    let rows: Vec<ItineraryRow> = itinerary.iter().map(ItineraryRow::from).collect();
                    output::print_list(&rows, format);
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&itinerary)?);
                }
            }
        }
        ReservationCommand::Cancel { token, id } => {
            let ctx = services.login(token).await?;
            services.reservations.delete_reservation(*id, &ctx).await?;
            output::print_success(&format!("Reservation {id} cancelled"));
        }
    }

    Ok(())
}
