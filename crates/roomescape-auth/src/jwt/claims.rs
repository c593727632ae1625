//! JWT claims structure used in login tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomescape_core::types::MemberId;
use roomescape_entity::member::MemberRole;

/// Claims payload embedded in every login token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the member ID.
    pub sub: Uuid,
    /// Member name at the time of issuance.
    pub name: String,
    /// Member role at the time of issuance.
    pub role: MemberRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the member ID from the subject claim.
    pub fn member_id(&self) -> MemberId {
        MemberId::from_uuid(self.sub)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
