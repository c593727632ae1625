//! Bookable start times.

use std::sync::Arc;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use roomescape_core::error::AppError;
use roomescape_core::result::AppResult;
use roomescape_core::types::TimeId;
use roomescape_database::repositories::ReservationTimeRepository;
use roomescape_entity::time::ReservationTime;

/// Request to open a new start time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRequest {
    /// Time of day the slot starts.
    pub start_at: NaiveTime,
}

/// Manages the set of bookable start times.
#[derive(Clone)]
pub struct ReservationTimeService {
    /// Time repository.
    time_repo: Arc<dyn ReservationTimeRepository>,
}

impl std::fmt::Debug for ReservationTimeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationTimeService").finish_non_exhaustive()
    }
}

impl ReservationTimeService {
    /// Creates a new time service.
    pub fn new(time_repo: Arc<dyn ReservationTimeRepository>) -> Self {
        Self { time_repo }
    }

    /// Gets a start time by id.
    pub async fn get_time(&self, id: TimeId) -> AppResult<ReservationTime> {
        self.time_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation time not found: {id}")))
    }

    /// Lists every start time, earliest first.
    pub async fn find_times(&self) -> AppResult<Vec<ReservationTime>> {
        self.time_repo.find_all().await
    }

    /// Opens a new start time.
    pub async fn add_time(&self, req: TimeRequest) -> AppResult<ReservationTime> {
        if self.time_repo.exists_by_start_at(req.start_at).await? {
            return Err(AppError::duplication(format!(
                "Reservation time {} already exists",
                req.start_at
            )));
        }

        let time = self.time_repo.save(&ReservationTime::new(req.start_at)).await?;

        info!(time_id = %time.id, start_at = %time.start_at, "Reservation time added");

        Ok(time)
    }

    /// Removes a start time.
    pub async fn delete_time(&self, id: TimeId) -> AppResult<()> {
        if !self.time_repo.delete_by_id(id).await? {
            return Err(AppError::not_found(format!(
                "Reservation time not found: {id}"
            )));
        }

        info!(time_id = %id, "Reservation time deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomescape_core::error::ErrorKind;
    use roomescape_database::memory::MemoryReservationTimeRepository;

    fn at(h: u32, m: u32) -> TimeRequest {
        TimeRequest {
            start_at: NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_times_listed_in_order() {
        let service = ReservationTimeService::new(Arc::new(MemoryReservationTimeRepository::new()));
        service.add_time(at(14, 0)).await.unwrap();
        service.add_time(at(10, 30)).await.unwrap();

        let times: Vec<_> = service
            .find_times()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.start_at)
            .collect();
        assert_eq!(times, vec![at(10, 30).start_at, at(14, 0).start_at]);
    }

    #[tokio::test]
    async fn test_duplicate_start_rejected() {
        let service = ReservationTimeService::new(Arc::new(MemoryReservationTimeRepository::new()));
        service.add_time(at(10, 0)).await.unwrap();

        let err = service.add_time(at(10, 0)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Duplication);
    }

    #[tokio::test]
    async fn test_delete() {
        let service = ReservationTimeService::new(Arc::new(MemoryReservationTimeRepository::new()));
        let time = service.add_time(at(10, 0)).await.unwrap();

        service.delete_time(time.id).await.unwrap();
        let err = service.get_time(time.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
