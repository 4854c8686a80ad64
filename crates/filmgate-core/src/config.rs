//! Shared configuration for Filmgate.
//!
//! All runtime knobs come from the environment; [`Settings`] is built once
//! at startup and passed by reference into the handlers, never mutated.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: bot credential from @BotFather
//! - `FILMGATE_FEED_CHANNEL`: numeric id of the moderated feed channel
//! - `FILMGATE_REQUIRED_CHANNEL`: channel users must join (`@name` or
//!   numeric id)
//! - `FILMGATE_BOT_USERNAME`: bot handle used to build deep links
//!
//! Optional:
//! - `FILMGATE_ADMIN_ID`: user id allowed to run /broadcast
//! - `FILMGATE_LIST_LIMIT`: size of the browsing list (default 10)
//! - `FILMGATE_STATE_DIR`: override the state directory (`~/.filmgate`)

use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;

/// Environment variable for the bot credential.
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Environment variable for the feed channel id.
pub const FEED_CHANNEL_ENV: &str = "FILMGATE_FEED_CHANNEL";

/// Environment variable for the required membership channel.
pub const REQUIRED_CHANNEL_ENV: &str = "FILMGATE_REQUIRED_CHANNEL";

/// Environment variable for the bot username used in deep links.
pub const BOT_USERNAME_ENV: &str = "FILMGATE_BOT_USERNAME";

/// Environment variable for the admin user id.
pub const ADMIN_ID_ENV: &str = "FILMGATE_ADMIN_ID";

/// Environment variable for the browsing list size.
pub const LIST_LIMIT_ENV: &str = "FILMGATE_LIST_LIMIT";

/// Environment variable for a custom state directory.
pub const STATE_DIR_ENV: &str = "FILMGATE_STATE_DIR";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".filmgate";

/// Default browsing list size.
const DEFAULT_LIST_LIMIT: usize = 10;

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the Filmgate state directory.
///
/// Determined by:
/// 1. `FILMGATE_STATE_DIR` environment variable if set
/// 2. `~/.filmgate` if a home directory is available
/// 3. `.filmgate` in the current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the env file path for secrets (token, channel ids).
pub fn env_file() -> PathBuf {
    state_dir().join(".env.local")
}

/// Ensure the state directory exists, creating it if necessary.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_state_dir() -> std::io::Result<()> {
    let dir = state_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// A variable is present but unparseable.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Immutable runtime settings, built once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bot credential.
    pub bot_token: String,
    /// Numeric id of the moderated feed channel (the only ingest source).
    pub feed_channel: i64,
    /// Channel users must be a member of before content is released.
    /// Either `@username` or a numeric chat id.
    pub required_channel: String,
    /// Bot handle used to construct deep links.
    pub bot_username: String,
    /// User id allowed to run the broadcast command, if any.
    pub admin_id: Option<i64>,
    /// Number of entries shown by the browsing view.
    pub list_limit: usize,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = require(BOT_TOKEN_ENV)?;
        let feed_channel = parse_var(FEED_CHANNEL_ENV, require(FEED_CHANNEL_ENV)?)?;
        let required_channel = require(REQUIRED_CHANNEL_ENV)?;
        let bot_username = require(BOT_USERNAME_ENV)?;

        let admin_id = match std::env::var(ADMIN_ID_ENV) {
            Ok(raw) => Some(parse_var(ADMIN_ID_ENV, raw)?),
            Err(_) => None,
        };
        let list_limit = match std::env::var(LIST_LIMIT_ENV) {
            Ok(raw) => parse_var(LIST_LIMIT_ENV, raw)?,
            Err(_) => DEFAULT_LIST_LIMIT,
        };

        Ok(Self {
            bot_token,
            feed_channel,
            required_channel,
            bot_username,
            admin_id,
            list_limit,
        })
    }

    /// Whether the given user id is the configured admin.
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_id == Some(user_id)
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::Missing(var))
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables can't be isolated across parallel tests, so the
    // env-reading path gets smoke coverage only; the parse helper is tested
    // directly.

    #[test]
    fn test_state_dir_name() {
        let dir = state_dir();
        assert!(dir.is_absolute() || dir.ends_with(".filmgate"));
    }

    #[test]
    fn test_env_file_name() {
        assert!(env_file().ends_with(".env.local"));
    }

    #[test]
    fn test_parse_var_accepts_channel_ids() {
        let id: i64 = parse_var(FEED_CHANNEL_ENV, "-1001234567890".to_string()).unwrap();
        assert_eq!(id, -1001234567890);

        let trimmed: i64 = parse_var(FEED_CHANNEL_ENV, " 42 \n".to_string()).unwrap();
        assert_eq!(trimmed, 42);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        let err = parse_var::<i64>(ADMIN_ID_ENV, "not-a-number".to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var, .. } if var == ADMIN_ID_ENV));
    }

    #[test]
    fn test_is_admin() {
        let settings = Settings {
            bot_token: "t".to_string(),
            feed_channel: -100,
            required_channel: "@films".to_string(),
            bot_username: "filmgatebot".to_string(),
            admin_id: Some(7),
            list_limit: 10,
        };
        assert!(settings.is_admin(7));
        assert!(!settings.is_admin(8));

        let no_admin = Settings {
            admin_id: None,
            ..settings
        };
        assert!(!no_admin.is_admin(7));
    }
}
