//! Platform-dependent resolution of the configuration file location.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

/// Directory name used under platform configuration roots on Windows.
const CONFIG_DIR_NAME: &str = "TelegramStdinChannelBot";

/// Configuration file name on Windows-family hosts.
const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors that can occur while resolving the configuration path.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error("Failed to create the configuration directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Host platform family, detected once at startup.
///
/// New platforms get a new variant and a new arm in the path strategies
/// rather than edits to existing branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// Detects the platform the binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// Which configuration file an invocation operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// Per-user configuration (the default).
    Local,
    /// System-wide configuration (`--global`).
    Global,
}

impl ConfigScope {
    /// Resolves the configuration file path for this scope and ensures its
    /// parent directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// parent directory cannot be created.
    pub fn config_path(self) -> Result<PathBuf, PathError> {
        let path = self.path_on(Platform::current())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!("Resolved {:?} configuration path: {}", self, path.display());

        Ok(path)
    }

    /// Computes the configuration path for `platform` without touching the
    /// filesystem.
    fn path_on(self, platform: Platform) -> Result<PathBuf, PathError> {
        match (self, platform) {
            (Self::Global, Platform::Windows) => {
                let base = std::env::var_os("PROGRAMDATA")
                    .map_or_else(|| PathBuf::from(r"C:\ProgramData"), PathBuf::from);
                Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            }
            (Self::Global, Platform::Unix) => {
                Ok(PathBuf::from("/etc/telegramstdinchannelbot.ini"))
            }
            (Self::Local, Platform::Windows) => {
                let base = std::env::var_os("APPDATA").map(PathBuf::from).or_else(|| {
                    dirs::home_dir().map(|home| home.join("AppData").join("Roaming"))
                });
                base.map(|base| base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
                    .ok_or(PathError::HomeDirUnavailable)
            }
            (Self::Local, Platform::Unix) => dirs::home_dir()
                .map(|home| home.join(".telegramstdinchannelbot.ini"))
                .ok_or(PathError::HomeDirUnavailable),
        }
    }
}
