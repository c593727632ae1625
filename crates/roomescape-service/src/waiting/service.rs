//! Waitlist entries for already-booked slots.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use roomescape_core::error::AppError;
use roomescape_core::result::AppResult;
use roomescape_core::traits::Clock;
use roomescape_core::types::{MemberId, ThemeId, TimeId, WaitingId};
use roomescape_database::repositories::{ReservationRepository, WaitingRepository};
use roomescape_entity::reservation::Slot;
use roomescape_entity::waiting::{Waiting, WaitingWithRank};

use crate::catalog::{ReservationTimeService, ThemeService};
use crate::context::RequestContext;
use crate::member::MemberService;

/// Request to join the queue for a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingRequest {
    /// Date of the slot.
    pub date: NaiveDate,
    /// Start time of the slot.
    pub time_id: TimeId,
    /// Theme of the slot.
    pub theme_id: ThemeId,
}

/// Creates, ranks, and removes waitlist entries.
#[derive(Clone)]
pub struct WaitingService {
    /// Waiting repository.
    waiting_repo: Arc<dyn WaitingRepository>,
    /// Reservation store, consulted so a holder cannot queue for their own slot.
    reservation_repo: Arc<dyn ReservationRepository>,
    /// Time lookups.
    times: Arc<ReservationTimeService>,
    /// Theme lookups.
    themes: Arc<ThemeService>,
    /// Member lookups.
    members: Arc<MemberService>,
    /// Source of "now" for past-slot checks.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for WaitingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaitingService").finish_non_exhaustive()
    }
}

impl WaitingService {
    /// Creates a new waiting service.
    pub fn new(
        waiting_repo: Arc<dyn WaitingRepository>,
        reservation_repo: Arc<dyn ReservationRepository>,
        times: Arc<ReservationTimeService>,
        themes: Arc<ThemeService>,
        members: Arc<MemberService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            waiting_repo,
            reservation_repo,
            times,
            themes,
            members,
            clock,
        }
    }

    /// Puts the calling member in the queue for a slot.
    ///
    /// A member either holds a slot or waits for it, never both.
    pub async fn add_waiting(
        &self,
        req: WaitingRequest,
        ctx: &RequestContext,
    ) -> AppResult<Waiting> {
        let time = self.times.get_time(req.time_id).await?;
        let theme = self.themes.get_theme(req.theme_id).await?;
        let member = self.members.get_login_member_by_id(ctx.member_id).await?;

        let waiting = Waiting::new(req.date, time, theme, member);

        if waiting.is_not_after(self.clock.now()) {
            return Err(AppError::validation(format!(
                "Cannot wait for a past slot: {}",
                waiting.start()
            )));
        }

        if self
            .reservation_repo
            .exists_by_slot_and_member(&waiting.slot(), ctx.member_id)
            .await?
        {
            return Err(AppError::duplication(
                "Member already holds the reservation for this slot",
            ));
        }

        if self
            .waiting_repo
            .exists_by_slot_and_member(&waiting.slot(), ctx.member_id)
            .await?
        {
            return Err(AppError::duplication(
                "Member is already waiting for this slot",
            ));
        }

        let waiting = self.waiting_repo.save(&waiting).await?;

        info!(
            waiting_id = %waiting.id,
            member_id = %ctx.member_id,
            date = %waiting.date,
            time = %waiting.time.start_at,
            theme = %waiting.theme.name,
            "Waiting added"
        );

        Ok(waiting)
    }

    /// Lists a member's waitings with their queue position.
    pub async fn find_waitings_by_member(
        &self,
        member_id: MemberId,
    ) -> AppResult<Vec<WaitingWithRank>> {
        self.waiting_repo.find_with_rank_by_member(member_id).await
    }

    /// Withdraws a waiting. Only the owner may withdraw; anyone else is ignored.
    pub async fn delete_by_id(&self, id: WaitingId, ctx: &RequestContext) -> AppResult<()> {
        let waiting = self
            .waiting_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Waiting not found: {id}")))?;

        if !waiting.is_owned_by(ctx.member_id) {
            debug!(
                waiting_id = %id,
                requester = %ctx.member_id,
                owner = %waiting.member.id,
                "Ignoring withdrawal by non-owner"
            );
            return Ok(());
        }

        self.waiting_repo.delete_by_id(id).await?;

        info!(waiting_id = %id, member_id = %ctx.member_id, "Waiting withdrawn");

        Ok(())
    }

    /// Lists every waiting.
    pub async fn find_waitings(&self) -> AppResult<Vec<Waiting>> {
        self.waiting_repo.find_all().await
    }

    /// Returns the head of the queue for a slot.
    pub async fn find_waiting_by_slot(
        &self,
        date: NaiveDate,
        time_id: TimeId,
        theme_id: ThemeId,
    ) -> AppResult<Option<Waiting>> {
        self.waiting_repo
            .find_first_by_slot(&Slot::new(date, time_id, theme_id))
            .await
    }

    /// Drops a waiting that has just been turned into a reservation.
    pub(crate) async fn remove_promoted(&self, waiting: &Waiting) -> AppResult<()> {
        if !self.waiting_repo.delete_by_id(waiting.id).await? {
            warn!(
                waiting_id = %waiting.id,
                member_id = %waiting.member.id,
                "Promoted waiting was already withdrawn"
            );
        }
        Ok(())
    }
}
