//! In-memory member repository.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use roomescape_core::error::AppError;
use roomescape_core::result::AppResult;
use roomescape_core::types::MemberId;
use roomescape_entity::member::Member;

use crate::repositories::MemberRepository;

/// In-memory member repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryMemberRepository {
    rows: Arc<Mutex<Vec<Member>>>,
}

impl MemoryMemberRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn find_all(&self) -> AppResult<Vec<Member>> {
        Ok(self.rows.lock().await.clone())
    }

    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .find(|m| m.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn save(&self, member: &Member) -> AppResult<Member> {
        let mut rows = self.rows.lock().await;
        if rows
            .iter()
            .any(|m| m.id == member.id || m.email.eq_ignore_ascii_case(&member.email))
        {
            return Err(AppError::duplication(format!(
                "Member with email '{}' already exists",
                member.email
            )));
        }
        rows.push(member.clone());
        Ok(member.clone())
    }
}
