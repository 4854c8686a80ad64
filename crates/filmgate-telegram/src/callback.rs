//! Callback-query handling.
//!
//! Button payloads form a closed set, decoded once here at the transport
//! boundary; nothing deeper in the bot parses callback strings.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MessageId};
use tracing::{info, warn};

use crate::gate::MembershipGate;
use crate::keyboards;
use crate::resolver::{self, Resolution};
use crate::state::BotState;

/// Actions a button can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Re-run the membership gate against the pending code.
    CheckJoin,
    /// Show the browsing list.
    ListFilms,
    /// Show the help text.
    Help,
    /// Return to the welcome menu.
    BackToMain,
}

impl CallbackAction {
    /// Wire payload for this action.
    pub fn as_payload(self) -> &'static str {
        match self {
            CallbackAction::CheckJoin => "check_join",
            CallbackAction::ListFilms => "list_films",
            CallbackAction::Help => "help",
            CallbackAction::BackToMain => "back_to_main",
        }
    }

    /// Decodes a wire payload. Unknown payloads are `None`.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "check_join" => Some(CallbackAction::CheckJoin),
            "list_films" => Some(CallbackAction::ListFilms),
            "help" => Some(CallbackAction::Help),
            "back_to_main" => Some(CallbackAction::BackToMain),
            _ => None,
        }
    }
}

/// Handles a callback query from an inline button.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Some(action) = CallbackAction::parse(data) else {
        warn!(user_id = %q.from.id, data = %data, "unknown callback payload");
        return Ok(());
    };

    // Buttons live in private chats; fall back to the user's own chat when
    // the original message is no longer accessible.
    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(q.from.id.0 as i64));
    let message_id = q.message.as_ref().map(|m| m.id());

    let texts = state.texts();

    match action {
        CallbackAction::Help => {
            edit_or_send(
                &bot,
                chat_id,
                message_id,
                texts.help,
                Some(keyboards::back_only(texts)),
            )
            .await
        }
        CallbackAction::BackToMain => {
            edit_or_send(
                &bot,
                chat_id,
                message_id,
                texts.welcome,
                Some(keyboards::main_menu(texts)),
            )
            .await
        }
        CallbackAction::ListFilms => {
            let items = match state.list_content().await {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "listing registry failed");
                    Vec::new()
                }
            };

            if items.is_empty() {
                edit_or_send(
                    &bot,
                    chat_id,
                    message_id,
                    texts.list_empty,
                    Some(keyboards::main_menu(texts)),
                )
                .await
            } else {
                edit_or_send(
                    &bot,
                    chat_id,
                    message_id,
                    texts.list_header,
                    Some(keyboards::film_list(&items, state.settings(), texts)),
                )
                .await
            }
        }
        CallbackAction::CheckJoin => {
            handle_check_join(&bot, chat_id, message_id, &q, &state).await
        }
    }
}

/// Re-runs the gate after the user claims to have joined.
///
/// The code stored when the gate first denied the request is reused here,
/// so a granted re-check completes the original delivery without the user
/// resending the link.
async fn handle_check_join(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    q: &CallbackQuery,
    state: &BotState,
) -> ResponseResult<()> {
    let texts = state.texts();
    let gate = MembershipGate::new(bot.clone(), &state.settings().required_channel);
    let membership = gate.check(q.from.id).await;

    let pending = state.sessions().pending_code(chat_id.0).await;
    match state.resolve_request(membership, pending.as_deref()).await {
        Resolution::Deliver(item) => {
            // Granted: the pending request is consumed here, exactly once.
            state.sessions().clear(chat_id.0).await;
            match resolver::deliver(bot, chat_id, &item, keyboards::main_menu(texts)).await {
                Ok(()) => {
                    info!(chat_id = %chat_id, code = %item.code, "delivery resumed after join");
                    edit_or_send(bot, chat_id, message_id, texts.delivered, None).await
                }
                Err(e) => {
                    warn!(chat_id = %chat_id, code = %item.code, error = %e, "content relay failed");
                    edit_or_send(bot, chat_id, message_id, texts.delivery_failed, None).await
                }
            }
        }
        Resolution::NotFound { code } => {
            info!(chat_id = %chat_id, code = %code, "pending code vanished from registry");
            state.sessions().clear(chat_id.0).await;
            edit_or_send(bot, chat_id, message_id, texts.not_found, None).await
        }
        Resolution::PromptJoin => {
            // Still denied: keep the pending code and re-prompt.
            edit_or_send(
                bot,
                chat_id,
                message_id,
                texts.still_not_member,
                Some(keyboards::join_gate(state.settings(), texts)),
            )
            .await
        }
        Resolution::Welcome => {
            // Nothing was pending; just report the gate outcome.
            if membership.is_member() {
                edit_or_send(
                    bot,
                    chat_id,
                    message_id,
                    texts.join_confirmed,
                    Some(keyboards::main_menu(texts)),
                )
                .await
            } else {
                edit_or_send(
                    bot,
                    chat_id,
                    message_id,
                    texts.still_not_member,
                    Some(keyboards::join_gate(state.settings(), texts)),
                )
                .await
            }
        }
    }
}

/// Edits the originating message in place, or sends a fresh message when it
/// is no longer accessible.
async fn edit_or_send(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    text: &str,
    keyboard: Option<InlineKeyboardMarkup>,
) -> ResponseResult<()> {
    match message_id {
        Some(id) => {
            let mut req = bot.edit_message_text(chat_id, id, text);
            if let Some(kb) = keyboard {
                req = req.reply_markup(kb);
            }
            // Re-pressing a button can edit identical content onto itself,
            // which the API rejects; the message already reads correctly.
            if let Err(e) = req.await {
                tracing::debug!(chat_id = %chat_id, error = %e, "message edit skipped");
            }
        }
        None => {
            let mut req = bot.send_message(chat_id, text);
            if let Some(kb) = keyboard {
                req = req.reply_markup(kb);
            }
            req.await?;
        }
    }
    Ok(())
}
