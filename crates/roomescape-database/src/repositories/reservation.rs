//! Reservation repository contract and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use roomescape_core::result::AppResult;
use roomescape_core::types::{MemberId, ReservationId, ThemeId};
use roomescape_entity::reservation::{Reservation, Slot};

use super::rows::{JOINED_COLUMNS, JOINS, ReservationRow};
use crate::error::map_sqlx;

/// Persistence contract for reservations.
#[async_trait]
pub trait ReservationRepository: Send + Sync + 'static {
    /// All reservations in storage order.
    async fn find_all(&self) -> AppResult<Vec<Reservation>>;

    /// Find a reservation by primary key.
    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>>;

    /// Reservations owned by a member.
    async fn find_by_member(&self, member_id: MemberId) -> AppResult<Vec<Reservation>>;

    /// Reservations of one theme owned by one member.
    async fn find_by_theme_and_member(
        &self,
        theme_id: ThemeId,
        member_id: MemberId,
    ) -> AppResult<Vec<Reservation>>;

    /// Whether the slot is already reserved.
    async fn exists_by_slot(&self, slot: &Slot) -> AppResult<bool>;

    /// Whether the member is the one holding the slot.
    async fn exists_by_slot_and_member(&self, slot: &Slot, member_id: MemberId)
    -> AppResult<bool>;

    /// Insert the reservation, or replace the stored row with the same id.
    ///
    /// Fails with `Duplication` when another reservation holds the slot.
    async fn save(&self, reservation: &Reservation) -> AppResult<Reservation>;

    /// Delete a reservation. Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: ReservationId) -> AppResult<bool>;
}

/// PostgreSQL-backed reservation repository.
#[derive(Debug, Clone)]
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select(filter: &str) -> String {
        format!("SELECT {JOINED_COLUMNS} FROM reservations x {JOINS} {filter}")
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&Self::select(""))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list reservations", e))?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>(&Self::select("WHERE x.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find reservation", e))?;
        Ok(row.map(Reservation::from))
    }

    async fn find_by_member(&self, member_id: MemberId) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&Self::select("WHERE x.member_id = $1"))
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list member reservations", e))?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_by_theme_and_member(
        &self,
        theme_id: ThemeId,
        member_id: MemberId,
    ) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&Self::select(
            "WHERE x.theme_id = $1 AND x.member_id = $2",
        ))
        .bind(theme_id)
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to search reservations", e))?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn exists_by_slot(&self, slot: &Slot) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM reservations \
             WHERE date = $1 AND time_id = $2 AND theme_id = $3)",
        )
        .bind(slot.date)
        .bind(slot.time_id)
        .bind(slot.theme_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to check reservation slot", e))
    }

    async fn exists_by_slot_and_member(
        &self,
        slot: &Slot,
        member_id: MemberId,
    ) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM reservations \
             WHERE date = $1 AND time_id = $2 AND theme_id = $3 AND member_id = $4)",
        )
        .bind(slot.date)
        .bind(slot.time_id)
        .bind(slot.theme_id)
        .bind(member_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to check reservation holder", e))
    }

    async fn save(&self, reservation: &Reservation) -> AppResult<Reservation> {
        sqlx::query(
            "INSERT INTO reservations (id, date, time_id, theme_id, member_id) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET \
             date = EXCLUDED.date, time_id = EXCLUDED.time_id, \
             theme_id = EXCLUDED.theme_id, member_id = EXCLUDED.member_id",
        )
        .bind(reservation.id)
        .bind(reservation.date)
        .bind(reservation.time.id)
        .bind(reservation.theme.id)
        .bind(reservation.member.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to save reservation", e))?;

        Ok(reservation.clone())
    }

    async fn delete_by_id(&self, id: ReservationId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to delete reservation", e))?;
        Ok(result.rows_affected() > 0)
    }
}

