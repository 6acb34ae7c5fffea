use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// A group the user must belong to before gated content is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupDescriptor {
    /// Platform chat id, e.g. "-1001234567890".
    pub id: String,
    /// Invite URL shown on the join button.
    pub invite_url: String,
    /// Display name.
    pub name: String,
}

/// Membership states the platform reports for a (group, user) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipKind {
    Member,
    Administrator,
    Owner,
    Restricted,
    Left,
    Kicked,
}

impl MembershipKind {
    /// Whether this state counts as being in the group.
    pub fn grants_access(self) -> bool {
        matches!(self, Self::Member | Self::Administrator | Self::Owner)
    }
}

/// Port to the platform's membership lookup.
#[async_trait]
pub trait MembershipLookup: Send + Sync {
    async fn get_membership(&self, group_id: &str, user_id: i64) -> Result<MembershipKind>;
}

/// Outcome of a gate check for one (user, required-group-set) pair.
///
/// Computed on demand for every gated action and immediately discarded;
/// membership can change between calls, so nothing here is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipStatus {
    pub satisfied: bool,
    /// Groups the user still has to join, in configured order.
    pub missing: Vec<GroupDescriptor>,
}

/// Check the user against every required group.
///
/// A failing lookup (network error, bot not privileged in that chat) counts
/// as not-a-member for that group: the gate fails closed. The error is logged
/// for operators and never surfaced to the end user.
pub async fn check_membership(
    lookup: &dyn MembershipLookup,
    user_id: i64,
    required: &[GroupDescriptor],
) -> MembershipStatus {
    let mut missing = Vec::new();
    for group in required {
        let is_member = match lookup.get_membership(&group.id, user_id).await {
            Ok(kind) => kind.grants_access(),
            Err(err) => {
                log::warn!(
                    "membership check for user {user_id} in {} failed, treating as not a member: {err}",
                    group.id
                );
                false
            }
        };
        if !is_member {
            missing.push(group.clone());
        }
    }
    MembershipStatus {
        satisfied: missing.is_empty(),
        missing,
    }
}

/// Fixed-answer lookup for offline tooling and tests.
pub struct StaticMembership {
    kind: MembershipKind,
}

impl StaticMembership {
    /// Everyone is a plain member everywhere.
    pub fn member() -> Self {
        Self {
            kind: MembershipKind::Member,
        }
    }

    /// Everyone has left every group.
    pub fn outsider() -> Self {
        Self {
            kind: MembershipKind::Left,
        }
    }
}

#[async_trait]
impl MembershipLookup for StaticMembership {
    async fn get_membership(&self, _group_id: &str, _user_id: i64) -> Result<MembershipKind> {
        Ok(self.kind)
    }
}
