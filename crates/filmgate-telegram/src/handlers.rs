//! Command and message handlers for the Telegram bot.

use std::sync::Arc;

use filmgate_core::ingest;
use filmgate_models::UserProfile;
use teloxide::prelude::*;
use teloxide::types::{User, UserId};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use crate::gate::MembershipGate;
use crate::keyboards;
use crate::resolver::{self, Resolution};
use crate::state::BotState;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Request a film by code or open the menu: /start [code]")]
    Start(String),

    #[command(description = "Show help message")]
    Help,

    #[command(description = "Admin: send a text to every known user")]
    Broadcast(String),
}

/// Dispatch commands to appropriate handlers.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start(arg) => handle_start(bot, msg, state, arg).await,
        Command::Help => handle_help(bot, msg, state).await,
        Command::Broadcast(text) => handle_broadcast(bot, msg, state, text).await,
    }
}

/// Handle the /start command, with or without a deep-link payload.
pub async fn handle_start(
    bot: Bot,
    msg: Message,
    state: Arc<BotState>,
    arg: String,
) -> ResponseResult<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };

    record_contact(&state, &user).await;

    let code = arg.trim().to_lowercase();
    if code.is_empty() {
        // Browsing entry: serve the menu and accept a typed code next.
        state.sessions().await_free_text(msg.chat.id.0).await;
        bot.send_message(msg.chat.id, state.texts().welcome)
            .reply_markup(keyboards::main_menu(state.texts()))
            .await?;
        info!(chat_id = %msg.chat.id, "served welcome menu");
        return Ok(());
    }

    resolve_code_request(&bot, msg.chat.id, user.id, &code, &state).await
}

/// Handle the /help command.
pub async fn handle_help(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, state.texts().help)
        .reply_markup(keyboards::back_only(state.texts()))
        .await?;
    Ok(())
}

/// Handle the /broadcast command (admin only).
pub async fn handle_broadcast(
    bot: Bot,
    msg: Message,
    state: Arc<BotState>,
    text: String,
) -> ResponseResult<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };

    if !state.settings().is_admin(user.id.0 as i64) {
        bot.send_message(msg.chat.id, state.texts().broadcast_denied)
            .await?;
        return Ok(());
    }

    let text = text.trim();
    if text.is_empty() {
        bot.send_message(msg.chat.id, state.texts().broadcast_usage)
            .await?;
        return Ok(());
    }

    // Snapshot the targets first so no store lock is held while sending.
    let targets = match state.broadcast_targets().await {
        Ok(targets) => targets,
        Err(e) => {
            warn!(error = %e, "could not load broadcast targets");
            Vec::new()
        }
    };

    let mut sent = 0usize;
    let mut failed = 0usize;
    for id in targets {
        match bot.send_message(ChatId(id), text).await {
            Ok(_) => sent += 1,
            Err(e) => {
                failed += 1;
                debug!(user_id = id, error = %e, "broadcast send failed");
            }
        }
    }

    bot.send_message(
        msg.chat.id,
        format!("Broadcast finished: {sent} sent, {failed} failed."),
    )
    .await?;
    info!(chat_id = %msg.chat.id, sent, failed, "broadcast finished");

    Ok(())
}

/// Handle plain text messages.
///
/// After the welcome menu, one typed message may carry a film code; the
/// marker is consumed whether or not a code is found, never reused across
/// unrelated messages.
pub async fn handle_text(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };

    if state.sessions().take_awaiting(msg.chat.id.0).await {
        match ingest::extract_code(text) {
            Some(code) => {
                return resolve_code_request(&bot, msg.chat.id, user.id, &code, &state).await;
            }
            None => {
                bot.send_message(msg.chat.id, state.texts().bad_code)
                    .await?;
                return Ok(());
            }
        }
    }

    bot.send_message(msg.chat.id, state.texts().fallback_hint)
        .await?;
    Ok(())
}

/// Runs one code request through the gate and the registry, and acts on
/// the outcome in a message context.
pub(crate) async fn resolve_code_request(
    bot: &Bot,
    chat_id: ChatId,
    user_id: UserId,
    code: &str,
    state: &BotState,
) -> ResponseResult<()> {
    let texts = state.texts();
    let gate = MembershipGate::new(bot.clone(), &state.settings().required_channel);
    let membership = gate.check(user_id).await;

    match state.resolve_request(membership, Some(code)).await {
        Resolution::Deliver(item) => {
            // A direct grant supersedes any stale pending state.
            state.sessions().clear(chat_id.0).await;
            match resolver::deliver(bot, chat_id, &item, keyboards::main_menu(texts)).await {
                Ok(()) => {
                    info!(chat_id = %chat_id, code = %item.code, "content delivered");
                }
                Err(e) => {
                    warn!(chat_id = %chat_id, code = %item.code, error = %e, "content relay failed");
                    bot.send_message(chat_id, texts.delivery_failed).await?;
                }
            }
        }
        Resolution::NotFound { code } => {
            info!(chat_id = %chat_id, code = %code, "requested code not registered");
            state.sessions().clear(chat_id.0).await;
            bot.send_message(chat_id, texts.not_found).await?;
        }
        Resolution::PromptJoin => {
            // Retain the code so a granted re-check resumes this delivery.
            state
                .sessions()
                .remember_code(chat_id.0, code.to_lowercase())
                .await;
            bot.send_message(chat_id, texts.join_prompt)
                .reply_markup(keyboards::join_gate(state.settings(), texts))
                .await?;
            info!(chat_id = %chat_id, code = %code, "join prompt issued");
        }
        Resolution::Welcome => {
            bot.send_message(chat_id, texts.welcome)
                .reply_markup(keyboards::main_menu(texts))
                .await?;
        }
    }

    Ok(())
}

/// Records the contacting user in the audit store.
async fn record_contact(state: &BotState, user: &User) {
    state
        .record_contact(UserProfile::new(
            user.id.0 as i64,
            user.username.clone(),
            user.first_name.clone(),
            user.last_name.clone(),
        ))
        .await;
}
