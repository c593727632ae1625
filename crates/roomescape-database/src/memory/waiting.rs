//! In-memory waiting repository.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use roomescape_core::error::AppError;
use roomescape_core::result::AppResult;
use roomescape_core::types::{MemberId, WaitingId};
use roomescape_entity::reservation::Slot;
use roomescape_entity::waiting::{Waiting, WaitingWithRank};

use crate::repositories::WaitingRepository;

/// In-memory waiting repository. The vector is the queue: earlier index
/// means earlier creation.
#[derive(Debug, Clone, Default)]
pub struct MemoryWaitingRepository {
    rows: Arc<Mutex<Vec<Waiting>>>,
}

impl MemoryWaitingRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WaitingRepository for MemoryWaitingRepository {
    async fn find_all(&self) -> AppResult<Vec<Waiting>> {
        Ok(self.rows.lock().await.clone())
    }

    async fn find_by_id(&self, id: WaitingId) -> AppResult<Option<Waiting>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|w| w.id == id).cloned())
    }

    async fn exists_by_slot_and_member(
        &self,
        slot: &Slot,
        member_id: MemberId,
    ) -> AppResult<bool> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .any(|w| w.slot() == *slot && w.is_owned_by(member_id)))
    }

    async fn find_first_by_slot(&self, slot: &Slot) -> AppResult<Option<Waiting>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|w| w.slot() == *slot).cloned())
    }

    async fn find_with_rank_by_member(
        &self,
        member_id: MemberId,
    ) -> AppResult<Vec<WaitingWithRank>> {
        let rows = self.rows.lock().await;
        let ranked = rows
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_owned_by(member_id))
            .map(|(position, w)| {
                let slot = w.slot();
                let ahead = rows[..position]
                    .iter()
                    .filter(|other| other.slot() == slot)
                    .count();
                WaitingWithRank::new(w.clone(), ahead as u64)
            })
            .collect();
        Ok(ranked)
    }

    async fn save(&self, waiting: &Waiting) -> AppResult<Waiting> {
        let mut rows = self.rows.lock().await;
        let slot = waiting.slot();
        if rows
            .iter()
            .any(|w| w.id == waiting.id || (w.slot() == slot && w.member.id == waiting.member.id))
        {
            return Err(AppError::duplication("Member is already waiting for slot"));
        }
        rows.push(waiting.clone());
        Ok(waiting.clone())
    }

    async fn delete_by_id(&self, id: WaitingId) -> AppResult<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|w| w.id != id);
        Ok(rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use roomescape_entity::member::{Member, MemberRole};
    use roomescape_entity::theme::Theme;
    use roomescape_entity::time::ReservationTime;

    fn member(name: &str) -> Member {
        Member::new(name, format!("{name}@example.com"), "hash", MemberRole::User)
    }

    #[tokio::test]
    async fn test_rank_counts_earlier_waiters_of_same_slot() {
        let repo = MemoryWaitingRepository::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let ten = ReservationTime::new(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let eleven = ReservationTime::new(NaiveTime::from_hms_opt(11, 0, 0).unwrap());
        let theme = Theme::new("theme-1", "desc", "thumb.png");
        let (a, b, c) = (member("a"), member("b"), member("c"));

        for m in [&a, &b, &c] {
            repo.save(&Waiting::new(date, ten.clone(), theme.clone(), m.clone()))
                .await
                .unwrap();
        }
        repo.save(&Waiting::new(date, eleven.clone(), theme.clone(), c.clone()))
            .await
            .unwrap();

        let ranks: Vec<u64> = repo
            .find_with_rank_by_member(c.id)
            .await
            .unwrap()
            .iter()
            .map(|w| w.rank)
            .collect();
        assert_eq!(ranks, vec![2, 0]);

        let head = repo
            .find_first_by_slot(&Slot::new(date, ten.id, theme.id))
            .await
            .unwrap()
            .unwrap();
        assert!(head.is_owned_by(a.id));
    }

    #[tokio::test]
    async fn test_duplicate_member_in_slot_rejected() {
        let repo = MemoryWaitingRepository::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let time = ReservationTime::new(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let theme = Theme::new("theme-1", "desc", "thumb.png");
        let a = member("a");

        repo.save(&Waiting::new(date, time.clone(), theme.clone(), a.clone()))
            .await
            .unwrap();
        let err = repo
            .save(&Waiting::new(date, time, theme, a))
            .await
            .unwrap_err();
        assert!(err.is(roomescape_core::error::ErrorKind::Duplication));
    }
}
