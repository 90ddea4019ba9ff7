//! On-disk configuration record: API token and channel identifier.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::{API_TOKEN_KEY, CHANNEL_ID_KEY};

/// Errors that can occur while loading, saving, or reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Configuration file not found at {}.\nRun with --configure to set up the configuration.",
        .0.display()
    )]
    Missing(PathBuf),

    #[error("Invalid API token format (expected `<numeric bot id>:<secret>`)")]
    InvalidApiToken,

    #[error("Invalid channel ID format (expected a negative integer, e.g. `-1002026241024`)")]
    InvalidChannelId,

    #[error(
        "Missing {0} in the configuration file.\nRun with --configure to reset the configuration."
    )]
    FieldMissing(&'static str),

    #[error("Failed to access the configuration file: {0}")]
    Io(#[from] std::io::Error),
}

// Token and channel ID formats follow the Bot API conventions: a numeric bot
// ID, a colon, and a secret for tokens; a negative integer for channel IDs.
// Both checks anchor at the start of the string only.
static API_TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:[\w-]+").expect("API token pattern is valid"));

static CHANNEL_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\d+").expect("channel ID pattern is valid"));

/// Checks whether a string is an acceptable bot API token.
#[must_use]
pub fn is_valid_api_token(token: &str) -> bool {
    API_TOKEN_PATTERN.is_match(token)
}

/// Checks whether a string is an acceptable channel identifier.
#[must_use]
pub fn is_valid_channel_id(channel_id: &str) -> bool {
    CHANNEL_ID_PATTERN.is_match(channel_id)
}

/// The persisted bot configuration.
///
/// Field formats are validated at save time only. A hand-edited file loads
/// fine and surfaces problems when a field is looked up.
#[derive(Debug, Clone, Default)]
pub struct BotConfig {
    values: HashMap<String, String>,
}

impl BotConfig {
    /// Loads the configuration from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the file does not exist, or an
    /// I/O error if it cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let values = parse_ini(&contents);
        debug!("Loaded {} configuration entries from {}", values.len(), path.display());

        Ok(Self { values })
    }

    /// Validates and persists the token and channel ID to the file at `path`.
    ///
    /// The whole file is rewritten with a single default section holding both
    /// keys. Nothing is written if either field fails validation.
    ///
    /// # Errors
    ///
    /// Returns a field-specific error when validation fails, or an I/O error
    /// if the file cannot be written.
    pub fn save(
        path: impl AsRef<Path>,
        api_token: &str,
        channel_id: &str,
    ) -> Result<(), ConfigError> {
        if !is_valid_api_token(api_token) {
            return Err(ConfigError::InvalidApiToken);
        }
        if !is_valid_channel_id(channel_id) {
            return Err(ConfigError::InvalidChannelId);
        }

        let path = path.as_ref();
        let contents = format!(
            "[DEFAULT]\n{API_TOKEN_KEY} = {api_token}\n{CHANNEL_ID_KEY} = {channel_id}\n"
        );
        std::fs::write(path, contents)?;
        debug!("Saved configuration to {}", path.display());

        Ok(())
    }

    /// Returns the stored API token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FieldMissing`] if the loaded file lacks the key.
    pub fn api_token(&self) -> Result<&str, ConfigError> {
        self.values
            .get(API_TOKEN_KEY)
            .map(String::as_str)
            .ok_or(ConfigError::FieldMissing(API_TOKEN_KEY))
    }

    /// Returns the stored channel identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FieldMissing`] if the loaded file lacks the key.
    pub fn channel_id(&self) -> Result<&str, ConfigError> {
        self.values
            .get(CHANNEL_ID_KEY)
            .map(String::as_str)
            .ok_or(ConfigError::FieldMissing(CHANNEL_ID_KEY))
    }
}

/// Parses the INI-style configuration contents into key/value pairs.
///
/// Section headers and comment lines are skipped; the file uses only the
/// default section so keys are not namespaced.
fn parse_ini(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('[') || line.starts_with('#') || line.starts_with(';')
        {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_owned(), value.trim().to_owned());
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_api_tokens() {
        assert!(is_valid_api_token("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11"));
        assert!(is_valid_api_token("1:a"));
        assert!(is_valid_api_token("42:some_secret-value"));
    }

    #[test]
    fn test_invalid_api_tokens() {
        assert!(!is_valid_api_token(""));
        assert!(!is_valid_api_token("no-colon"));
        assert!(!is_valid_api_token("abc:secret"));
        assert!(!is_valid_api_token(":secret"));
        assert!(!is_valid_api_token("123:"));
    }

    #[test]
    fn test_valid_channel_ids() {
        assert!(is_valid_channel_id("-1002026241024"));
        assert!(is_valid_channel_id("-1"));
    }

    #[test]
    fn test_invalid_channel_ids() {
        assert!(!is_valid_channel_id(""));
        assert!(!is_valid_channel_id("1002026241024"));
        assert!(!is_valid_channel_id("-"));
        assert!(!is_valid_channel_id("channel"));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.ini");

        BotConfig::save(&path, "123456:secret-token", "-1002026241024")
            .expect("save valid config");

        let config = BotConfig::load(&path).expect("load saved config");
        assert_eq!(config.api_token().expect("token present"), "123456:secret-token");
        assert_eq!(config.channel_id().expect("channel present"), "-1002026241024");
    }

    #[test]
    fn test_save_rejects_invalid_token_without_writing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.ini");

        let result = BotConfig::save(&path, "not-a-token", "-100");
        assert!(matches!(result, Err(ConfigError::InvalidApiToken)));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_rejects_invalid_channel_without_writing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.ini");

        let result = BotConfig::save(&path, "123:token", "100");
        assert!(matches!(result, Err(ConfigError::InvalidChannelId)));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("absent.ini");

        let result = BotConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Missing(_))));

        let message = result.expect_err("missing file is an error").to_string();
        assert!(message.contains("--configure"));
    }

    #[test]
    fn test_hand_edited_file_surfaces_missing_field() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.ini");
        std::fs::write(&path, format!("[DEFAULT]\n{API_TOKEN_KEY} = 123:abc\n"))
            .expect("write partial config");

        let config = BotConfig::load(&path).expect("partial file still loads");
        assert!(config.api_token().is_ok());
        assert!(matches!(
            config.channel_id(),
            Err(ConfigError::FieldMissing(CHANNEL_ID_KEY))
        ));
    }

    #[test]
    fn test_parse_ini_skips_sections_and_comments() {
        let contents = "[DEFAULT]\n# comment\n; also a comment\n\nKEY = value with = sign\n";
        let values = parse_ini(contents);
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("KEY").map(String::as_str), Some("value with = sign"));
    }
}
