//! Member signup, login, and identity resolution.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use roomescape_auth::jwt::{JwtDecoder, JwtEncoder};
use roomescape_auth::password::PasswordHasher;
use roomescape_core::config::AuthConfig;
use roomescape_core::error::AppError;
use roomescape_core::result::AppResult;
use roomescape_core::types::MemberId;
use roomescape_database::repositories::MemberRepository;
use roomescape_entity::member::{Member, MemberRole};

use crate::context::RequestContext;

/// Request to register a new member.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Handles member registration, login, and token-based identity.
#[derive(Clone)]
pub struct MemberService {
    /// Member repository.
    member_repo: Arc<dyn MemberRepository>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Login token encoder.
    encoder: JwtEncoder,
    /// Login token decoder.
    decoder: JwtDecoder,
    /// Minimum accepted password length.
    password_min_length: usize,
}

impl std::fmt::Debug for MemberService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberService")
            .field("encoder", &self.encoder)
            .field("password_min_length", &self.password_min_length)
            .finish_non_exhaustive()
    }
}

impl MemberService {
    /// Creates a new member service.
    pub fn new(member_repo: Arc<dyn MemberRepository>, config: &AuthConfig) -> Self {
        Self {
            member_repo,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            password_min_length: config.password_min_length,
        }
    }

    /// Registers a new member with the `User` role.
    pub async fn signup(&self, req: SignupRequest) -> AppResult<Member> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid signup request: {e}")))?;

        if req.password.chars().count() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        if self.member_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::duplication(format!(
                "Email '{}' is already registered",
                req.email
            )));
        }

        let hash = self.hasher.hash_password(&req.password)?;
        let member = Member::new(req.name.trim(), req.email, hash, MemberRole::User);
        let member = self.member_repo.save(&member).await?;

        info!(member_id = %member.id, email = %member.email, "Member signed up");

        Ok(member)
    }

    /// Verifies credentials and issues a login token.
    pub async fn create_member_token(&self, req: LoginRequest) -> AppResult<String> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid login request: {e}")))?;

        let member = self
            .member_repo
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No member with email '{}'", req.email)))?;

        if !self
            .hasher
            .verify_password(&req.password, &member.password_hash)?
        {
            debug!(member_id = %member.id, "Login rejected: wrong password");
            return Err(AppError::authentication("Invalid email or password"));
        }

        let token = self.encoder.generate_token(&member)?;

        info!(member_id = %member.id, "Member logged in");

        Ok(token)
    }

    /// Resolves a login token to the member it was issued for.
    pub async fn get_login_member_by_token(&self, token: &str) -> AppResult<RequestContext> {
        let claims = self.decoder.decode_token(token)?;
        let member = self.get_login_member_by_id(claims.member_id()).await?;
        Ok(RequestContext::from(&member))
    }

    /// Loads the member acting in the current call.
    pub async fn get_login_member_by_id(&self, id: MemberId) -> AppResult<Member> {
        self.get_by_id(id).await
    }

    /// Gets a member by id.
    pub async fn get_by_id(&self, id: MemberId) -> AppResult<Member> {
        self.member_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Member not found: {id}")))
    }

    /// Lists every member.
    pub async fn find_members(&self) -> AppResult<Vec<Member>> {
        self.member_repo.find_all().await
    }
}
