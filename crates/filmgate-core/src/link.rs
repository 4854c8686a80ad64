//! Deep-link construction.
//!
//! A deep link is the shareable URL that opens the bot with a start payload
//! carrying a content code: `https://t.me/<bot>?start=<code>`.

use url::form_urlencoded;

/// Builds the deep link for a content code.
///
/// A leading `@` on the bot username is tolerated and stripped; the code is
/// percent-encoded into the start parameter.
pub fn deep_link(bot_username: &str, code: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(code.as_bytes()).collect();
    format!(
        "https://t.me/{}?start={}",
        bot_username.trim_start_matches('@'),
        encoded
    )
}

/// Builds the join URL for a channel referenced as `@username`.
///
/// Numeric channel ids have no public URL; callers should only build join
/// links for username-addressed channels.
pub fn channel_link(channel: &str) -> String {
    format!("https://t.me/{}", channel.trim_start_matches('@'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_link() {
        assert_eq!(
            deep_link("filmgatebot", "film042"),
            "https://t.me/filmgatebot?start=film042"
        );
    }

    #[test]
    fn test_deep_link_strips_at_sign() {
        assert_eq!(
            deep_link("@filmgatebot", "film1"),
            "https://t.me/filmgatebot?start=film1"
        );
    }

    #[test]
    fn test_deep_link_encodes_payload() {
        // Codes are always `film` + digits, but the encoder must not trust that.
        assert_eq!(
            deep_link("bot", "a b"),
            "https://t.me/bot?start=a+b"
        );
    }

    #[test]
    fn test_channel_link() {
        assert_eq!(channel_link("@films"), "https://t.me/films");
        assert_eq!(channel_link("films"), "https://t.me/films");
    }
}
