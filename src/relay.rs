//! Relays standard input to the configured channel as a sequence of messages.

use std::borrow::Cow;
use std::io::{self, IsTerminal, Read};

use thiserror::Error;
use tracing::{debug, info};

use crate::telegram::{ChannelClient, SendError, TELEGRAM_MAX_MESSAGE_BYTES};

/// Errors that can occur while relaying standard input.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(
        "No stdin provided. Pipe the text you want to send into the program, \
         e.g. `dmesg | telegram_stdin_bot`."
    )]
    NoInput,

    #[error("Failed to read standard input: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Send(#[from] SendError),
}

/// Splits raw input into message-sized text chunks.
///
/// Chunking is byte-oriented: each chunk is at most
/// [`TELEGRAM_MAX_MESSAGE_BYTES`] long and a multi-byte UTF-8 sequence may be
/// split across a boundary, in which case the partial bytes are replaced on
/// conversion.
pub fn chunk_messages(input: &[u8]) -> impl Iterator<Item = Cow<'_, str>> {
    input.chunks(TELEGRAM_MAX_MESSAGE_BYTES).map(String::from_utf8_lossy)
}

/// Reads all of standard input and relays it through `client`.
///
/// # Errors
///
/// Returns [`RelayError::NoInput`] when stdin is an interactive terminal,
/// and propagates the first read or dispatch failure otherwise.
pub async fn run(client: &ChannelClient) -> Result<(), RelayError> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(RelayError::NoInput);
    }

    let mut input = Vec::new();
    stdin.read_to_end(&mut input)?;

    relay_bytes(client, &input).await
}

/// Dispatches `input` chunk by chunk, in order, stopping at the first failure.
pub async fn relay_bytes(client: &ChannelClient, input: &[u8]) -> Result<(), RelayError> {
    let mut sent = 0usize;

    for chunk in chunk_messages(input) {
        debug!("Sending chunk {} ({} bytes)", sent + 1, chunk.len());
        client.send_message(&chunk).await?;
        sent += 1;
    }

    info!("Relayed {} bytes in {} messages", input.len(), sent);
    Ok(())
}
