//! Request context carrying the authenticated member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roomescape_core::types::MemberId;
use roomescape_entity::member::{Member, MemberRole};

/// Context for the current authenticated call.
///
/// Resolved from a login token by [`crate::MemberService`] and passed into
/// every member-scoped service method, so each operation knows *who* is
/// acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated member's ID.
    pub member_id: MemberId,
    /// The member's display name.
    pub name: String,
    /// The member's role.
    pub role: MemberRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(member_id: MemberId, name: String, role: MemberRole) -> Self {
        Self {
            member_id,
            name,
            role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current member is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&Member> for RequestContext {
    fn from(member: &Member) -> Self {
        Self::new(member.id, member.name.clone(), member.role)
    }
}
