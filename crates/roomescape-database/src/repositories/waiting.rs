//! Waiting repository contract and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use roomescape_core::result::AppResult;
use roomescape_core::types::{MemberId, WaitingId};
use roomescape_entity::reservation::Slot;
use roomescape_entity::waiting::{Waiting, WaitingWithRank};

use super::rows::{JOINED_COLUMNS, JOINS, RankedWaitingRow, WaitingRow};
use crate::error::map_sqlx;

/// Persistence contract for waiting-list entries.
///
/// Queue order is creation order: `created_at`, then `id`.
#[async_trait]
pub trait WaitingRepository: Send + Sync + 'static {
    /// All waitings in storage order.
    async fn find_all(&self) -> AppResult<Vec<Waiting>>;

    /// Find a waiting by primary key.
    async fn find_by_id(&self, id: WaitingId) -> AppResult<Option<Waiting>>;

    /// Whether the member already waits for the slot.
    async fn exists_by_slot_and_member(&self, slot: &Slot, member_id: MemberId)
    -> AppResult<bool>;

    /// The head of the queue for a slot.
    async fn find_first_by_slot(&self, slot: &Slot) -> AppResult<Option<Waiting>>;

    /// A member's waitings, each with its rank among waiters of the same slot.
    async fn find_with_rank_by_member(&self, member_id: MemberId)
    -> AppResult<Vec<WaitingWithRank>>;

    /// Insert a waiting. Fails with `Duplication` when the member already
    /// waits for the slot.
    async fn save(&self, waiting: &Waiting) -> AppResult<Waiting>;

    /// Delete a waiting. Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: WaitingId) -> AppResult<bool>;
}

/// PostgreSQL-backed waiting repository.
#[derive(Debug, Clone)]
pub struct PgWaitingRepository {
    pool: PgPool,
}

impl PgWaitingRepository {
    /// Create a new waiting repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select(filter: &str) -> String {
        format!("SELECT {JOINED_COLUMNS}, x.created_at FROM waitings x {JOINS} {filter}")
    }
}

#[async_trait]
impl WaitingRepository for PgWaitingRepository {
    async fn find_all(&self) -> AppResult<Vec<Waiting>> {
        let rows = sqlx::query_as::<_, WaitingRow>(&Self::select(""))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list waitings", e))?;
        Ok(rows.into_iter().map(Waiting::from).collect())
    }

    async fn find_by_id(&self, id: WaitingId) -> AppResult<Option<Waiting>> {
        let row = sqlx::query_as::<_, WaitingRow>(&Self::select("WHERE x.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find waiting", e))?;
        Ok(row.map(Waiting::from))
    }

    async fn exists_by_slot_and_member(
        &self,
        slot: &Slot,
        member_id: MemberId,
    ) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM waitings \
             WHERE date = $1 AND time_id = $2 AND theme_id = $3 AND member_id = $4)",
        )
        .bind(slot.date)
        .bind(slot.time_id)
        .bind(slot.theme_id)
        .bind(member_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to check waiting", e))
    }

    async fn find_first_by_slot(&self, slot: &Slot) -> AppResult<Option<Waiting>> {
        let row = sqlx::query_as::<_, WaitingRow>(&Self::select(
            "WHERE x.date = $1 AND x.time_id = $2 AND x.theme_id = $3 \
             ORDER BY x.created_at, x.id LIMIT 1",
        ))
        .bind(slot.date)
        .bind(slot.time_id)
        .bind(slot.theme_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to find queue head", e))?;
        Ok(row.map(Waiting::from))
    }

    async fn find_with_rank_by_member(
        &self,
        member_id: MemberId,
    ) -> AppResult<Vec<WaitingWithRank>> {
        let sql = format!(
            "SELECT {JOINED_COLUMNS}, x.created_at, \
             (SELECT COUNT(*) FROM waitings w \
              WHERE w.date = x.date AND w.time_id = x.time_id AND w.theme_id = x.theme_id \
              AND (w.created_at, w.id) < (x.created_at, x.id)) AS rank \
             FROM waitings x {JOINS} \
             WHERE x.member_id = $1 \
             ORDER BY x.created_at, x.id"
        );

        let rows = sqlx::query_as::<_, RankedWaitingRow>(&sql)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to rank member waitings", e))?;
        Ok(rows.into_iter().map(WaitingWithRank::from).collect())
    }

    async fn save(&self, waiting: &Waiting) -> AppResult<Waiting> {
        sqlx::query(
            "INSERT INTO waitings (id, date, time_id, theme_id, member_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(waiting.id)
        .bind(waiting.date)
        .bind(waiting.time.id)
        .bind(waiting.theme.id)
        .bind(waiting.member.id)
        .bind(waiting.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to save waiting", e))?;

        Ok(waiting.clone())
    }

    async fn delete_by_id(&self, id: WaitingId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM waitings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to delete waiting", e))?;
        Ok(result.rows_affected() > 0)
    }
}
