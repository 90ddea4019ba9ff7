//! Interactive configuration of the bot token and target channel.

use std::path::Path;
use std::sync::LazyLock;

use dialoguer::Input;
use rand::Rng;
use regex::Regex;
use thiserror::Error;
use tracing::info;

use crate::config::{BotConfig, ConfigError};
use crate::telegram::{ChannelClient, SendError};

/// Errors that can occur during interactive setup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to read input: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid channel URL format (expected a trailing ID like `#-1002026241024`)")]
    InvalidChannelUrl,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error("Verification failed. The entered number does not match.")]
    VerificationMismatch,
}

static CHANNEL_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-\d+)$").expect("channel URL pattern is valid"));

/// Extracts the channel identifier from a channel URL.
///
/// The identifier is the trailing negative integer, as shown in web client
/// URLs such as `https://web.telegram.org/a/#-1002026241024`.
#[must_use]
pub fn extract_channel_id(channel_url: &str) -> Option<&str> {
    CHANNEL_URL_PATTERN
        .find(channel_url)
        .map(|id| id.as_str())
}

/// Runs the interactive setup sequence.
///
/// Collects the token and channel URL, persists the validated configuration
/// to `config_path`, then confirms the setup end to end by sending a random
/// verification code to the channel and asking the operator to echo it back.
///
/// The configuration is persisted before verification; a failed verification
/// leaves it in place.
///
/// # Errors
///
/// Returns an error if a prompt fails, the channel URL carries no trailing
/// ID, a field fails format validation, the verification message cannot be
/// sent, or the echoed code does not match.
pub async fn run(config_path: &Path) -> Result<(), SetupError> {
    let api_token: String = Input::new()
        .with_prompt("Enter Telegram API token")
        .interact_text()?;

    let channel_url: String = Input::new()
        .with_prompt(
            "Enter the Telegram channel URL (e.g., https://web.telegram.org/a/#-1002026241024)",
        )
        .interact_text()?;

    let channel_id = extract_channel_id(&channel_url).ok_or(SetupError::InvalidChannelUrl)?;

    let code: u32 = rand::rng().random_range(1000..=9999);

    BotConfig::save(config_path, &api_token, channel_id)?;
    info!("Configuration saved to {}", config_path.display());

    let client = ChannelClient::new(api_token, channel_id.to_owned());
    client
        .send_message(&format!("Your verification code is: {code}"))
        .await?;
    println!("A verification message has been sent to your Telegram channel.");

    let entered: String = Input::new()
        .with_prompt("Please enter the verification code you received")
        .interact_text()?;

    if !verification_matches(code, &entered) {
        return Err(SetupError::VerificationMismatch);
    }

    println!("Verification successful! Your bot is now configured.");
    Ok(())
}

/// Compares the operator's echoed input against the generated code.
///
/// The input is trimmed; the comparison is against the decimal
/// representation of the code.
fn verification_matches(code: u32, entered: &str) -> bool {
    entered.trim() == code.to_string()
}
