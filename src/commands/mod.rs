//! CLI command definitions and dispatch.

pub mod member;
pub mod reservation;
pub mod theme;
pub mod time;
pub mod waiting;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use roomescape_core::config::AppConfig;
use roomescape_core::error::AppError;
use roomescape_core::traits::{Clock, SystemClock};
use roomescape_database::DatabasePool;
use roomescape_database::repositories::{
    PgMemberRepository, PgReservationRepository, PgReservationTimeRepository, PgThemeRepository,
    PgWaitingRepository, ReservationRepository,
};
use roomescape_service::{
    MemberService, RequestContext, ReservationService, ReservationTimeService, ThemeService,
    WaitingService,
};

use crate::output::OutputFormat;

/// Room escape reservation backend operator tool
#[derive(Debug, Parser)]
#[command(name = "roomescape", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Member signup, login, and listing
    Member(member::MemberArgs),
    /// Theme catalog management
    Theme(theme::ThemeArgs),
    /// Bookable start time management
    Time(time::TimeArgs),
    /// Reservation booking and cancellation
    Reservation(reservation::ReservationArgs),
    /// Waitlist management
    Waiting(waiting::WaitingArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let services = Services::connect(&config).await?;

        let result = match &self.command {
            Commands::Member(args) => member::execute(args, &services, self.format).await,
            Commands::Theme(args) => theme::execute(args, &services, self.format).await,
            Commands::Time(args) => time::execute(args, &services, self.format).await,
            Commands::Reservation(args) => {
                reservation::execute(args, &services, self.format).await
            }
            Commands::Waiting(args) => waiting::execute(args, &services, self.format).await,
        };

        services.db.close().await;
        result
    }
}

/// Helper: load configuration from file, the `ROOMESCAPE_ENV` overlay and
/// `ROOMESCAPE__*` variables
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("ROOMESCAPE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Services wired against PostgreSQL.
pub struct Services {
    /// Shared connection pool.
    pub db: DatabasePool,
    /// Member signup, login, and lookups.
    pub members: Arc<MemberService>,
    /// Theme catalog.
    pub themes: Arc<ThemeService>,
    /// Bookable start times.
    pub times: Arc<ReservationTimeService>,
    /// Waitlist.
    pub waitings: Arc<WaitingService>,
    /// Reservations.
    pub reservations: Arc<ReservationService>,
}

impl Services {
    /// Connects to the database and builds every service.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let db = DatabasePool::connect(&config.database).await?;
        let pool = db.pool().clone();
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let members = Arc::new(MemberService::new(
            Arc::new(PgMemberRepository::new(pool.clone())),
            &config.auth,
        ));
        let themes = Arc::new(ThemeService::new(Arc::new(PgThemeRepository::new(
            pool.clone(),
        ))));
        let times = Arc::new(ReservationTimeService::new(Arc::new(
            PgReservationTimeRepository::new(pool.clone()),
        )));
        let reservation_repo: Arc<dyn ReservationRepository> =
            Arc::new(PgReservationRepository::new(pool.clone()));
        let waitings = Arc::new(WaitingService::new(
            Arc::new(PgWaitingRepository::new(pool)),
            Arc::clone(&reservation_repo),
            Arc::clone(&times),
            Arc::clone(&themes),
            Arc::clone(&members),
            Arc::clone(&clock),
        ));
        let reservations = Arc::new(ReservationService::new(
            reservation_repo,
            Arc::clone(&waitings),
            Arc::clone(&times),
            Arc::clone(&themes),
            Arc::clone(&members),
            clock,
        ));

        Ok(Self {
            db,
            members,
            themes,
            times,
            waitings,
            reservations,
        })
    }

    /// Resolves a login token to the acting member.
    pub async fn login(&self, token: &str) -> Result<RequestContext, AppError> {
        self.members.get_login_member_by_token(token).await
    }
}
