//! Membership-gated content delivery bot for Telegram.
//!
//! Content posted to a moderated feed channel is registered under a
//! shareable code (`film` + digits, extracted from the post caption).
//! Users request content through deep links; the bot releases it only
//! after a live check that the user is a member of the required channel,
//! and otherwise prompts them to join, retaining the requested code so
//! delivery resumes once they confirm.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: bot token from @BotFather
//! - `FILMGATE_FEED_CHANNEL`: numeric id of the moderated feed channel
//! - `FILMGATE_REQUIRED_CHANNEL`: channel users must join (`@name` or id)
//! - `FILMGATE_BOT_USERNAME`: bot handle used in deep links
//!
//! Optional:
//! - `FILMGATE_ADMIN_ID`: user id allowed to run /broadcast
//! - `FILMGATE_LIST_LIMIT`: browsing list size (default 10)
//! - `FILMGATE_STATE_DIR`: state directory (default `~/.filmgate`)
//!
//! # Example
//!
//! ```no_run
//! use filmgate_core::Settings;
//! use filmgate_telegram::FilmgateBot;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let bot = FilmgateBot::new(settings)?;
//!     bot.start_polling().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Commands
//!
//! - `/start [code]` - request content by code, or show the menu
//! - `/help` - show available commands
//! - `/broadcast <text>` - admin only, message every known user

pub mod bot;
pub mod callback;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod ingestor;
pub mod keyboards;
pub mod resolver;
pub mod session;
pub mod state;
pub mod texts;

pub use bot::FilmgateBot;
pub use error::{BotError, Result};
pub use gate::MembershipGate;
pub use resolver::Resolution;
pub use session::SessionMap;
pub use state::{create_shared_state, BotState};
pub use texts::Texts;
