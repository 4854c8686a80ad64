//! Filmgate Core - shared business logic for the bot.
//!
//! This crate holds everything that is independent of the messaging
//! transport:
//!
//! - **config**: environment-backed settings and state-directory paths
//! - **ingest**: content-code extraction and title derivation from feed
//!   captions
//! - **link**: deep-link construction for shareable content codes

pub mod config;
pub mod ingest;
pub mod link;

// Re-export commonly used items for convenience
pub use config::{ensure_state_dir, env_file, state_dir, ConfigError, Settings};
pub use ingest::{derive_title, extract_code};
pub use link::{channel_link, deep_link};
