//! Reservation time repository contract and PostgreSQL implementation.

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::PgPool;

use roomescape_core::result::AppResult;
use roomescape_core::types::TimeId;
use roomescape_entity::time::ReservationTime;

use crate::error::map_sqlx;

/// Persistence contract for the bookable start times.
#[async_trait]
pub trait ReservationTimeRepository: Send + Sync + 'static {
    /// All times, earliest first.
    async fn find_all(&self) -> AppResult<Vec<ReservationTime>>;

    /// Find a time by primary key.
    async fn find_by_id(&self, id: TimeId) -> AppResult<Option<ReservationTime>>;

    /// Whether a time with this start exists.
    async fn exists_by_start_at(&self, start_at: NaiveTime) -> AppResult<bool>;

    /// Insert a time.
    async fn save(&self, time: &ReservationTime) -> AppResult<ReservationTime>;

    /// Delete a time. Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: TimeId) -> AppResult<bool>;
}

/// PostgreSQL-backed reservation time repository.
#[derive(Debug, Clone)]
pub struct PgReservationTimeRepository {
    pool: PgPool,
}

impl PgReservationTimeRepository {
    /// Create a new time repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationTimeRepository for PgReservationTimeRepository {
    async fn find_all(&self) -> AppResult<Vec<ReservationTime>> {
        sqlx::query_as::<_, ReservationTime>("SELECT * FROM reservation_times ORDER BY start_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list times", e))
    }

    async fn find_by_id(&self, id: TimeId) -> AppResult<Option<ReservationTime>> {
        sqlx::query_as::<_, ReservationTime>("SELECT * FROM reservation_times WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find time", e))
    }

    async fn exists_by_start_at(&self, start_at: NaiveTime) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM reservation_times WHERE start_at = $1)")
            .bind(start_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to check time", e))
    }

    async fn save(&self, time: &ReservationTime) -> AppResult<ReservationTime> {
        sqlx::query_as::<_, ReservationTime>(
            "INSERT INTO reservation_times (id, start_at) VALUES ($1, $2) RETURNING *",
        )
        .bind(time.id)
        .bind(time.start_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to create time", e))
    }

    async fn delete_by_id(&self, id: TimeId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reservation_times WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to delete time", e))?;
        Ok(result.rows_affected() > 0)
    }
}
