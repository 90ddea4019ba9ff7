//! Telegram Bot API integration.
//!
//! Provides the HTTP client used to post messages to a channel.

mod client;

pub use client::{ChannelClient, SendError};

/// Maximum size of a single Telegram message, in bytes.
pub const TELEGRAM_MAX_MESSAGE_BYTES: usize = 4096;
