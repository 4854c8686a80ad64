//! Access gate: live membership checks against the required channel.

use std::time::Duration;

use filmgate_models::MembershipStatus;
use teloxide::prelude::*;
use teloxide::types::{ChatMemberStatus, Recipient, UserId};
use teloxide::RequestError;
use tracing::{debug, warn};

/// Upper bound on one directory query. Exceeding it yields `Unknown`.
pub const GATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Answers "is this user currently a member of the required channel?".
///
/// Stateless by design: every call performs a live query, so a user removed
/// from the channel loses access on their next request. There is no cache
/// to go stale.
pub struct MembershipGate {
    bot: Bot,
    channel: Recipient,
}

impl MembershipGate {
    /// Creates a gate for the configured channel (`@username` or numeric id).
    pub fn new(bot: Bot, required_channel: &str) -> Self {
        Self {
            bot,
            channel: channel_recipient(required_channel),
        }
    }

    /// Performs one live membership check.
    ///
    /// The caller must treat `Unknown` exactly like `NotMember`: content is
    /// never released on an inconclusive answer.
    pub async fn check(&self, user_id: UserId) -> MembershipStatus {
        let request = self.bot.get_chat_member(self.channel.clone(), user_id);

        match tokio::time::timeout(GATE_TIMEOUT, request).await {
            Ok(Ok(member)) => classify(member.kind.status()),
            Ok(Err(RequestError::Api(err))) => {
                // The directory answered; "user not found" and friends all
                // classify as not-member.
                debug!(user_id = %user_id, error = %err, "directory rejected membership query");
                MembershipStatus::NotMember
            }
            Ok(Err(err)) => {
                warn!(user_id = %user_id, error = %err, "membership check failed");
                MembershipStatus::Unknown
            }
            Err(_) => {
                warn!(user_id = %user_id, "membership check timed out");
                MembershipStatus::Unknown
            }
        }
    }
}

/// Maps a directory-reported role onto a membership classification.
///
/// Accepted roles are ordinary member, administrator and owner. Everything
/// else, including restricted users, is not a member.
pub(crate) fn classify(status: ChatMemberStatus) -> MembershipStatus {
    match status {
        ChatMemberStatus::Owner | ChatMemberStatus::Administrator | ChatMemberStatus::Member => {
            MembershipStatus::Member
        }
        ChatMemberStatus::Restricted | ChatMemberStatus::Left | ChatMemberStatus::Banned => {
            MembershipStatus::NotMember
        }
    }
}

/// Parses the configured channel reference into an API recipient.
pub(crate) fn channel_recipient(raw: &str) -> Recipient {
    if let Ok(id) = raw.trim().parse::<i64>() {
        Recipient::Id(ChatId(id))
    } else if raw.starts_with('@') {
        Recipient::ChannelUsername(raw.to_string())
    } else {
        Recipient::ChannelUsername(format!("@{raw}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_roles() {
        assert_eq!(classify(ChatMemberStatus::Member), MembershipStatus::Member);
        assert_eq!(
            classify(ChatMemberStatus::Administrator),
            MembershipStatus::Member
        );
        assert_eq!(classify(ChatMemberStatus::Owner), MembershipStatus::Member);
    }

    #[test]
    fn test_rejected_roles() {
        assert_eq!(
            classify(ChatMemberStatus::Restricted),
            MembershipStatus::NotMember
        );
        assert_eq!(classify(ChatMemberStatus::Left), MembershipStatus::NotMember);
        assert_eq!(
            classify(ChatMemberStatus::Banned),
            MembershipStatus::NotMember
        );
    }

    #[test]
    fn test_channel_recipient_forms() {
        assert!(matches!(
            channel_recipient("@films"),
            Recipient::ChannelUsername(name) if name == "@films"
        ));
        assert!(matches!(
            channel_recipient("-1001234567890"),
            Recipient::Id(ChatId(-1001234567890))
        ));
        assert!(matches!(
            channel_recipient("films"),
            Recipient::ChannelUsername(name) if name == "@films"
        ));
    }
}
