//! JSON-file implementation of the settings repository.

use crate::paths::RelayPaths;
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use idearelay_core::error::{RelayError, Result};
use idearelay_core::settings::{Settings, SettingsRepository};
use std::path::PathBuf;

/// Stores the last-used composer settings as one JSON document.
///
/// Loading goes through [`Settings::from_stored`] so legacy blob layouts
/// (the old `modes` array or the single `mode` string) migrate on read; a
/// subsequent save rewrites the blob in the current layout.
pub struct JsonSettingsRepository {
    file: AtomicJsonFile<Settings>,
}

impl JsonSettingsRepository {
    /// Opens the repository at the default location.
    pub fn try_default() -> Result<Self> {
        let path = RelayPaths::settings_file()
            .map_err(|err| RelayError::data_access(err.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Opens the repository at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    async fn load(&self) -> Result<Settings> {
        let value = self
            .file
            .load_value()
            .map_err(|err| RelayError::data_access(err.to_string()))?;
        Ok(value.map(Settings::from_stored).unwrap_or_default())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        self.file
            .save(settings)
            .map_err(|err| RelayError::data_access(err.to_string()))
    }
}
