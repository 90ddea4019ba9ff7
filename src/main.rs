//! Telegram Stdin Channel Bot - Main Entry Point
//!
//! Reads text from standard input and relays it as messages to a Telegram
//! channel via the Bot API. Run with `--configure` once to set up the token
//! and target channel.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use telegram_stdin_bot::config::{BotConfig, ConfigScope};
use telegram_stdin_bot::telegram::ChannelClient;
use telegram_stdin_bot::{relay, setup};

/// Send stdin to a Telegram channel.
#[derive(Parser, Debug)]
#[command(name = "telegram_stdin_bot")]
#[command(about = "Send stdin to a Telegram channel")]
#[command(version)]
struct Args {
    /// Configure the Telegram API token and channel ID.
    #[arg(long)]
    configure: bool,

    /// Use the system-wide configuration instead of the per-user one.
    #[arg(long = "global")]
    use_global_config: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    let scope = if args.use_global_config {
        ConfigScope::Global
    } else {
        ConfigScope::Local
    };

    let config_path = scope
        .config_path()
        .context("Failed to resolve the configuration path")?;
    debug!("Using configuration file at {}", config_path.display());

    if args.configure {
        setup::run(&config_path)
            .await
            .context("Error during configuration")?;
        return Ok(());
    }

    let config = BotConfig::load(&config_path)?;
    let client = ChannelClient::new(
        config.api_token()?.to_owned(),
        config.channel_id()?.to_owned(),
    );

    relay::run(&client).await?;
    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
