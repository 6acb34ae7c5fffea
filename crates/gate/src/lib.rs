//! Group-membership gate in front of catalog content.
//!
//! Membership is looked up through the [`MembershipLookup`] port and
//! re-evaluated on every gated action; it is never cached, since a user may
//! join between attempts. Lookup failures fail closed.

mod error;
mod membership;

pub use error::{GateError, Result};
pub use membership::{
    check_membership, GroupDescriptor, MembershipKind, MembershipLookup, MembershipStatus,
    StaticMembership,
};
