//! Configuration module for the stdin channel bot.
//!
//! Handles resolution of the configuration file location, persistence of
//! the API token and channel identifier, and format validation.

mod paths;
mod store;

pub use paths::{ConfigScope, PathError, Platform};
pub use store::{is_valid_api_token, is_valid_channel_id, BotConfig, ConfigError};

/// Configuration key holding the bot API token.
pub const API_TOKEN_KEY: &str = "TELEGRAM_API_TOKEN";

/// Configuration key holding the target channel identifier.
pub const CHANNEL_ID_KEY: &str = "TELEGRAM_CHANNEL_ID";
