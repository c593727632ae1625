//! Member CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use roomescape_core::error::AppError;
use roomescape_entity::member::Member;
use roomescape_service::member::{LoginRequest, SignupRequest};

use super::Services;
use crate::output::{self, OutputFormat};

/// Arguments for member commands
#[derive(Debug, Args)]
pub struct MemberArgs {
    /// Member subcommand
    #[command(subcommand)]
    pub command: MemberCommand,
}

/// Member subcommands
#[derive(Debug, Subcommand)]
pub enum MemberCommand {
    /// Register a new member
    Signup {
        /// Display name
        #[arg(long)]
        name: String,
        /// Login email
        #[arg(long)]
        email: String,
        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in and print a login token
    Login {
        /// Login email
        #[arg(long)]
        email: String,
        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// List all members
    List,
}

/// Member display row for table output
#[derive(Debug, Serialize, Tabled)]
struct MemberRow {
    /// Member ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Role
    role: String,
}

impl From<&Member> for MemberRow {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name.clone(),
            email: m.email.clone(),
            role: m.role.to_string(),
        }
    }
}

/// Execute member commands
pub async fn execute(
    args: &MemberArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        MemberCommand::Signup {
            name,
            email,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let member = services
                .members
                .signup(SignupRequest {
                    name: name.clone(),
                    email: email.clone(),
                    password,
                })
                .await?;

            output::print_item(&MemberRow::from(&member), format);
        }
        MemberCommand::Login { email, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let token = services
                .members
                .create_member_token(LoginRequest {
                    email: email.clone(),
                    password,
                })
                .await?;

            match format {
                OutputFormat::Table => println!("{token}"),
                OutputFormat::Json => println!("{}", serde_json::json!({ "token": token })),
            }
        }
        MemberCommand::List => {
            let members = services.members.find_members().await?;
            let rows: Vec<MemberRow> = members.iter().map(MemberRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
