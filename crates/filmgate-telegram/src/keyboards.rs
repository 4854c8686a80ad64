//! Inline keyboards.
//!
//! All layouts are built from the immutable settings and texts passed in by
//! the handlers; nothing here holds state.

use filmgate_core::{channel_link, deep_link, Settings};
use filmgate_models::ContentItem;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::warn;
use url::Url;

use crate::callback::CallbackAction;
use crate::texts::Texts;

/// Main menu shown with the welcome message and after delivery.
pub fn main_menu(texts: &Texts) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            texts.btn_help,
            CallbackAction::Help.as_payload(),
        )],
        vec![InlineKeyboardButton::callback(
            texts.btn_list,
            CallbackAction::ListFilms.as_payload(),
        )],
    ])
}

/// Join-gate keyboard: a join link (when the channel has a public
/// username) and the confirmation button that re-runs the gate.
pub fn join_gate(settings: &Settings, texts: &Texts) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();

    if let Some(join) = join_url(&settings.required_channel) {
        rows.push(vec![InlineKeyboardButton::url(texts.btn_join, join)]);
    }
    rows.push(vec![InlineKeyboardButton::callback(
        texts.btn_check_join,
        CallbackAction::CheckJoin.as_payload(),
    )]);

    InlineKeyboardMarkup::new(rows)
}

/// A single back-to-menu button.
pub fn back_only(texts: &Texts) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        texts.btn_back,
        CallbackAction::BackToMain.as_payload(),
    )]])
}

/// Browsing keyboard: one deep-link button per item, newest first, plus a
/// back button.
pub fn film_list(items: &[ContentItem], settings: &Settings, texts: &Texts) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = items
        .iter()
        .filter_map(|item| {
            let link = deep_link(&settings.bot_username, &item.code);
            match Url::parse(&link) {
                Ok(url) => Some(vec![InlineKeyboardButton::url(
                    item.display_title().to_string(),
                    url,
                )]),
                Err(e) => {
                    warn!(code = %item.code, error = %e, "skipping unlinkable item");
                    None
                }
            }
        })
        .collect();

    rows.push(vec![InlineKeyboardButton::callback(
        texts.btn_back,
        CallbackAction::BackToMain.as_payload(),
    )]);

    InlineKeyboardMarkup::new(rows)
}

fn join_url(channel: &str) -> Option<Url> {
    // Numeric channel ids have no public URL to point a button at.
    if channel.starts_with('@') {
        Url::parse(&channel_link(channel)).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmgate_models::ContentKind;

    fn test_settings() -> Settings {
        Settings {
            bot_token: "token".to_string(),
            feed_channel: -100,
            required_channel: "@films".to_string(),
            bot_username: "filmgatebot".to_string(),
            admin_id: None,
            list_limit: 10,
        }
    }

    #[test]
    fn test_join_gate_has_link_and_confirm() {
        let kb = join_gate(&test_settings(), &Texts::default());
        assert_eq!(kb.inline_keyboard.len(), 2);
    }

    #[test]
    fn test_join_gate_without_public_channel() {
        let mut settings = test_settings();
        settings.required_channel = "-1009876".to_string();

        let kb = join_gate(&settings, &Texts::default());
        // Only the confirmation button remains.
        assert_eq!(kb.inline_keyboard.len(), 1);
    }

    #[test]
    fn test_film_list_rows() {
        let items = vec![
            ContentItem::new("film1", "h1", ContentKind::Video, "One", "One"),
            ContentItem::new("film2", "h2", ContentKind::Document, "", ""),
        ];

        let kb = film_list(&items, &test_settings(), &Texts::default());
        // One row per item plus the back row.
        assert_eq!(kb.inline_keyboard.len(), 3);
        assert_eq!(kb.inline_keyboard[0][0].text, "One");
        // Untitled items fall back to their code.
        assert_eq!(kb.inline_keyboard[1][0].text, "film2");
    }
}
