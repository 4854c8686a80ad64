//! User-facing message texts.
//!
//! One immutable bundle, built at startup and passed by reference into the
//! handlers. Keeping every string here means the handlers never format
//! copy inline and the whole surface can be reviewed in one place.

/// All user-visible texts.
#[derive(Debug, Clone)]
pub struct Texts {
    pub welcome: &'static str,
    pub help: &'static str,
    pub join_prompt: &'static str,
    pub join_confirmed: &'static str,
    pub still_not_member: &'static str,
    pub not_found: &'static str,
    pub delivered: &'static str,
    pub delivery_failed: &'static str,
    pub list_header: &'static str,
    pub list_empty: &'static str,
    pub bad_code: &'static str,
    pub fallback_hint: &'static str,
    pub unknown_command: &'static str,
    pub broadcast_usage: &'static str,
    pub broadcast_denied: &'static str,

    // Button labels
    pub btn_help: &'static str,
    pub btn_list: &'static str,
    pub btn_join: &'static str,
    pub btn_check_join: &'static str,
    pub btn_back: &'static str,
}

impl Default for Texts {
    fn default() -> Self {
        Self {
            welcome: "Welcome to the film bot! 🎬\n\n\
                Open a film link to receive it directly, or send a film \
                code (like film042) as a message.\n\n\
                If anything goes wrong, contact support.",
            help: "How to use this bot:\n\n\
                1. Open a film link to receive the film\n\
                2. If the link does not work, join our channel first\n\
                3. After joining, press the \"I have joined\" button\n\
                4. Use the film list button to browse what's available\n\n\
                Contact the admin if you run into problems.",
            join_prompt: "⚠️ You need to join our channel before receiving films.\n\n\
                After joining, press the \"I have joined\" button and your \
                film will be sent automatically.",
            join_confirmed: "✅ Great, you're in! You can now use film links.",
            still_not_member: "❌ You haven't joined the channel yet. Please join first, \
                then press the button again.",
            not_found: "❌ That film could not be found.",
            delivered: "✅ Film sent, enjoy!",
            delivery_failed: "❌ Sending the film failed. Please try again later.",
            list_header: "🎬 Available films:",
            list_empty: "📭 No films are available right now.",
            bad_code: "That doesn't look like a film code. Codes look like film042.",
            fallback_hint: "Send /start to begin, or use the buttons.",
            unknown_command: "Unknown command. Send /start to begin.",
            broadcast_usage: "Usage: /broadcast <text>",
            broadcast_denied: "Only the admin can do that.",

            btn_help: "Help 📖",
            btn_list: "Film list 🎬",
            btn_join: "Join the channel 📢",
            btn_check_join: "I have joined ✔",
            btn_back: "Back ◀️",
        }
    }
}
