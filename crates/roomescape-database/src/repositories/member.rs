//! Member repository contract and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use roomescape_core::result::AppResult;
use roomescape_core::types::MemberId;
use roomescape_entity::member::Member;

use crate::error::map_sqlx;

/// Persistence contract for members.
#[async_trait]
pub trait MemberRepository: Send + Sync + 'static {
    /// All members.
    async fn find_all(&self) -> AppResult<Vec<Member>>;

    /// Find a member by primary key.
    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>>;

    /// Find a member by login email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>>;

    /// Insert a member. Fails with `Duplication` when the email is taken.
    async fn save(&self, member: &Member) -> AppResult<Member>;
}

/// PostgreSQL-backed member repository.
#[derive(Debug, Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_all(&self) -> AppResult<Vec<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list members", e))
    }

    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find member by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find member by email", e))
    }

    async fn save(&self, member: &Member) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            "INSERT INTO members (id, name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(member.id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.password_hash)
        .bind(member.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to create member", e))
    }
}
