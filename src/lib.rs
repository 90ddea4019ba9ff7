//! Telegram Stdin Channel Bot Library
//!
//! Send standard input to a Telegram channel via the Bot API.
//!
//! This crate provides the core functionality for:
//! - Resolving and persisting the bot configuration (token and channel ID)
//! - Posting messages through the Bot API `sendMessage` endpoint
//! - Interactive one-time setup with a verification round-trip
//! - Chunked relay of piped standard input

pub mod config;
pub mod relay;
pub mod setup;
pub mod telegram;
