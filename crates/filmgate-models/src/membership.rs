//! Membership classification produced by the access gate.

use serde::{Deserialize, Serialize};

/// Outcome of a live membership check against the required channel.
///
/// Computed fresh on every check and never stored: membership can change
/// between checks, and a stale positive would keep releasing content to a
/// removed member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// The directory reported an accepted role (member, admin, owner).
    Member,
    /// The directory answered with any other role, or reported the user
    /// as not found.
    NotMember,
    /// The check could not be completed (timeout, transport failure,
    /// malformed or unauthorized response).
    Unknown,
}

impl MembershipStatus {
    /// Whether content may be released on this outcome.
    ///
    /// `Unknown` fails closed: content is never released on an
    /// inconclusive check.
    pub fn is_member(self) -> bool {
        matches!(self, MembershipStatus::Member)
    }
}
