//! Filesystem locations for IdeaRelay configuration and data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors resolving application paths.
#[derive(Error, Debug)]
pub enum PathsError {
    #[error("could not determine the user configuration directory")]
    ConfigDirNotFound,
}

/// Resolves well-known application paths under the user config directory.
///
/// Everything lives in `<config_dir>/idearelay/` (e.g.
/// `~/.config/idearelay/` on Linux).
pub struct RelayPaths;

impl RelayPaths {
    /// The application configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathsError> {
        dirs::config_dir()
            .map(|dir| dir.join("idearelay"))
            .ok_or(PathsError::ConfigDirNotFound)
    }

    /// Path to the secret configuration file.
    pub fn secret_file() -> Result<PathBuf, PathsError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Path to the structuring history store.
    pub fn history_file() -> Result<PathBuf, PathsError> {
        Ok(Self::config_dir()?.join("history.json"))
    }

    /// Path to the last-used settings store.
    pub fn settings_file() -> Result<PathBuf, PathsError> {
        Ok(Self::config_dir()?.join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_the_config_dir() {
        let config = RelayPaths::config_dir().unwrap();
        assert!(RelayPaths::secret_file().unwrap().starts_with(&config));
        assert!(RelayPaths::history_file().unwrap().starts_with(&config));
        assert!(RelayPaths::settings_file().unwrap().starts_with(&config));
        assert!(config.ends_with("idearelay"));
    }
}
