//! Booking, searching, and cancelling reservations.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use roomescape_core::error::AppError;
use roomescape_core::result::AppResult;
use roomescape_core::traits::Clock;
use roomescape_core::types::{ReservationId, ThemeId, TimeId};
use roomescape_database::repositories::ReservationRepository;
use roomescape_entity::member::Member;
use roomescape_entity::reservation::Reservation;

use super::dto::{
    AdminReservationRequest, MemberReservation, ReservationRequest, ReservationSearch,
};
use crate::catalog::{ReservationTimeService, ThemeService};
use crate::context::RequestContext;
use crate::member::MemberService;
use crate::waiting::WaitingService;

/// Creates and cancels reservations, handing freed slots to the waitlist.
#[derive(Clone)]
pub struct ReservationService {
    /// Reservation repository.
    reservation_repo: Arc<dyn ReservationRepository>,
    /// Waitlist, consulted on cancellation.
    waitings: Arc<WaitingService>,
    /// Time lookups.
    times: Arc<ReservationTimeService>,
    /// Theme lookups.
    themes: Arc<ThemeService>,
    /// Member lookups.
    members: Arc<MemberService>,
    /// Source of "now" for past-slot checks.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ReservationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationService").finish_non_exhaustive()
    }
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(
        reservation_repo: Arc<dyn ReservationRepository>,
        waitings: Arc<WaitingService>,
        times: Arc<ReservationTimeService>,
        themes: Arc<ThemeService>,
        members: Arc<MemberService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reservation_repo,
            waitings,
            times,
            themes,
            members,
            clock,
        }
    }

    /// Books a slot for the calling member.
    pub async fn add_reservation(
        &self,
        req: ReservationRequest,
        ctx: &RequestContext,
    ) -> AppResult<Reservation> {
        let member = self.members.get_login_member_by_id(ctx.member_id).await?;
        self.book(req.date, req.time_id, req.theme_id, member).await
    }

    /// Books a slot on behalf of the given member.
    pub async fn add_reservation_by_admin(
        &self,
        req: AdminReservationRequest,
    ) -> AppResult<Reservation> {
        let member = self.members.get_by_id(req.member_id).await?;
        self.book(req.date, req.time_id, req.theme_id, member).await
    }

    async fn book(
        &self,
        date: NaiveDate,
        time_id: TimeId,
        theme_id: ThemeId,
        member: Member,
    ) -> AppResult<Reservation> {
        let time = self.times.get_time(time_id).await?;
        let theme = self.themes.get_theme(theme_id).await?;

        let reservation = Reservation::new(date, time, theme, member);

        if reservation.is_not_after(self.clock.now()) {
            return Err(AppError::validation(format!(
                "Cannot reserve a past slot: {}",
                reservation.start()
            )));
        }

        if self
            .reservation_repo
            .exists_by_slot(&reservation.slot())
            .await?
        {
            return Err(AppError::duplication("The slot is already reserved"));
        }

        let reservation = self.reservation_repo.save(&reservation).await?;

        info!(
            reservation_id = %reservation.id,
            member_id = %reservation.member.id,
            date = %reservation.date,
            time = %reservation.time.start_at,
            theme = %reservation.theme.name,
            "Reservation created"
        );

        Ok(reservation)
    }

    /// Lists every reservation.
    pub async fn find_reservations(&self) -> AppResult<Vec<Reservation>> {
        self.reservation_repo.find_all().await
    }

    /// Finds one member's reservations for one theme within a date range.
    pub async fn search_reservations(
        &self,
        search: ReservationSearch,
    ) -> AppResult<Vec<Reservation>> {
        let theme = self.themes.get_theme(search.theme_id).await?;
        let member = self.members.get_by_id(search.member_id).await?;

        let found = self
            .reservation_repo
            .find_by_theme_and_member(theme.id, member.id)
            .await?;

        Ok(found
            .into_iter()
            .filter(|r| r.is_between_inclusive(search.date_from, search.date_to))
            .collect())
    }

    /// The calling member's itinerary: held reservations and queue positions,
    /// ordered by date then start time.
    pub async fn find_reservations_by_member(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<Vec<MemberReservation>> {
        let reservations = self.reservation_repo.find_by_member(ctx.member_id).await?;
        let waitings = self.waitings.find_waitings_by_member(ctx.member_id).await?;

        let mut rows: Vec<MemberReservation> = reservations
            .into_iter()
            .map(MemberReservation::from)
            .chain(waitings.into_iter().map(MemberReservation::from))
            .collect();

        // Stable: reservations stay ahead of waitings on equal keys.
        rows.sort_by_key(|row| (row.date, row.start_at));

        Ok(rows)
    }

    /// Cancels a reservation. The head of the slot's queue, if any, takes it
    /// over under the same id. Requests from anyone but the owner are ignored.
    pub async fn delete_reservation(
        &self,
        id: ReservationId,
        ctx: &RequestContext,
    ) -> AppResult<()> {
        let reservation = self
            .reservation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation not found: {id}")))?;

        if !reservation.is_owned_by(ctx.member_id) {
            debug!(
                reservation_id = %id,
                requester = %ctx.member_id,
                owner = %reservation.member.id,
                "Ignoring cancellation by non-owner"
            );
            return Ok(());
        }

        let head = self
            .waitings
            .find_waiting_by_slot(reservation.date, reservation.time.id, reservation.theme.id)
            .await?;

        match head {
            Some(waiting) => {
                let promoted = reservation.transfer_to(waiting.member.clone());
                self.reservation_repo.save(&promoted).await?;
                self.waitings.remove_promoted(&waiting).await?;

                info!(
                    reservation_id = %id,
                    from = %ctx.member_id,
                    to = %waiting.member.id,
                    waiting_id = %waiting.id,
                    "Reservation cancelled and promoted from waitlist"
                );
            }
            None => {
                self.reservation_repo.delete_by_id(id).await?;

                info!(reservation_id = %id, member_id = %ctx.member_id, "Reservation cancelled");
            }
        }

        Ok(())
    }
}
