//! Error types for the Telegram bot.

use thiserror::Error;

/// Errors that can occur while running the bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Settings could not be read from the environment.
    #[error("configuration error: {0}")]
    Config(#[from] filmgate_core::ConfigError),

    /// A registry or user-store operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] filmgate_persistence::PersistenceError),

    /// A Telegram API request failed.
    #[error("Telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;
