//! Main Telegram bot implementation.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tracing::{info, warn};

use crate::callback::handle_callback;
use crate::error::Result;
use crate::handlers::{handle_command, handle_text, Command};
use crate::ingestor::handle_channel_post;
use crate::state::{create_shared_state, BotState};
use filmgate_core::{config, Settings};

/// The Filmgate Telegram bot.
pub struct FilmgateBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Shared state across handlers.
    state: Arc<BotState>,
}

impl FilmgateBot {
    /// Creates a bot from settings, rooting state at the default state
    /// directory.
    pub fn new(settings: Settings) -> Result<Self> {
        config::ensure_state_dir()?;
        let bot = Bot::new(settings.bot_token.clone());
        let state = create_shared_state(settings, &config::state_dir());

        Ok(Self { bot, state })
    }

    /// Creates a bot with custom state (for testing).
    pub fn with_state(state: Arc<BotState>) -> Self {
        let bot = Bot::new(state.settings().bot_token.clone());
        Self { bot, state }
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self.bot.get_me().await?;
        Ok(me.username().to_string())
    }

    /// Runs the bot with long polling until interrupted.
    pub async fn start_polling(&self) -> Result<()> {
        info!("Starting Filmgate bot in polling mode...");

        let bot = self.bot.clone();

        let state_for_posts = Arc::clone(&self.state);
        let state_for_commands = Arc::clone(&self.state);
        let state_for_messages = Arc::clone(&self.state);
        let state_for_callbacks = Arc::clone(&self.state);
        let state_for_unknown = Arc::clone(&self.state);

        let handler = dptree::entry()
            .branch(
                Update::filter_channel_post().endpoint(move |msg: Message| {
                    let state = Arc::clone(&state_for_posts);
                    async move { handle_channel_post(msg, state).await }
                }),
            )
            .branch(
                Update::filter_callback_query().endpoint(
                    move |bot: Bot, q: teloxide::types::CallbackQuery| {
                        let state = Arc::clone(&state_for_callbacks);
                        async move { handle_callback(bot, q, state).await }
                    },
                ),
            )
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let state = Arc::clone(&state_for_commands);
                        info!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        async move { handle_command(bot, msg, cmd, state).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        // Commands that did not parse fall through to here.
                        msg.text().map(|t| t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(move |bot: Bot, msg: Message| {
                        let state = Arc::clone(&state_for_unknown);
                        async move {
                            if let Some(text) = msg.text() {
                                info!(cmd = %text, "Unrecognized command");
                                bot.send_message(msg.chat.id, state.texts().unknown_command)
                                    .await?;
                            }
                            Ok(())
                        }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        msg.text().map(|t| !t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(move |bot: Bot, msg: Message| {
                        let state = Arc::clone(&state_for_messages);
                        async move { handle_text(bot, msg, state).await }
                    }),
            );

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(bot, handler)
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
