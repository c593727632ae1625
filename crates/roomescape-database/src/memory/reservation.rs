//! In-memory reservation repository.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use roomescape_core::error::AppError;
use roomescape_core::result::AppResult;
use roomescape_core::types::{MemberId, ReservationId, ThemeId};
use roomescape_entity::reservation::{Reservation, Slot};

use crate::repositories::ReservationRepository;

/// In-memory reservation repository with a per-slot uniqueness rule.
#[derive(Debug, Clone, Default)]
pub struct MemoryReservationRepository {
    rows: Arc<Mutex<Vec<Reservation>>>,
}

impl MemoryReservationRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.rows.lock().await.clone())
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_member(&self, member_id: MemberId) -> AppResult<Vec<Reservation>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|r| r.is_owned_by(member_id))
            .cloned()
            .collect())
    }

    async fn find_by_theme_and_member(
        &self,
        theme_id: ThemeId,
        member_id: MemberId,
    ) -> AppResult<Vec<Reservation>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|r| r.theme.id == theme_id && r.is_owned_by(member_id))
            .cloned()
            .collect())
    }

    async fn exists_by_slot(&self, slot: &Slot) -> AppResult<bool> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().any(|r| r.slot() == *slot))
    }

    async fn exists_by_slot_and_member(
        &self,
        slot: &Slot,
        member_id: MemberId,
    ) -> AppResult<bool> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .any(|r| r.slot() == *slot && r.is_owned_by(member_id)))
    }

    async fn save(&self, reservation: &Reservation) -> AppResult<Reservation> {
        let mut rows = self.rows.lock().await;
        let slot = reservation.slot();

        if rows
            .iter()
            .any(|r| r.id != reservation.id && r.slot() == slot)
        {
            warn!(reservation_id = %reservation.id, "Slot already held by another reservation");
            return Err(AppError::duplication("Reservation already exists for slot"));
        }

        match rows.iter_mut().find(|r| r.id == reservation.id) {
            Some(existing) => *existing = reservation.clone(),
            None => rows.push(reservation.clone()),
        }
        Ok(reservation.clone())
    }

    async fn delete_by_id(&self, id: ReservationId) -> AppResult<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}
