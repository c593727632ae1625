//! Member entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use roomescape_core::types::MemberId;

use super::role::MemberRole;

/// A registered member. Referenced by reservations and waitings, owned by
/// the identity side of the system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    /// Unique member identifier.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Login email, unique across members.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Member role.
    pub role: MemberRole,
}

impl Member {
    /// Create a new member with a fresh id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: MemberRole,
    ) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
        }
    }

    /// Check if this member has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Members are the same member when their ids match.
impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Member {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let member = Member::new("kim", "kim@example.com", "$argon2id$secret", MemberRole::User);
        let json = serde_json::to_value(&member).expect("serialize");
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_equality_by_id() {
        let a = Member::new("a", "a@example.com", "h", MemberRole::User);
        let mut b = a.clone();
        b.name = "renamed".to_string();
        assert_eq!(a, b);
        assert_ne!(a, Member::new("a", "a@example.com", "h", MemberRole::User));
    }
}
