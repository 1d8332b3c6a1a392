//! JSON-file implementation of the history repository.

use crate::paths::RelayPaths;
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use idearelay_core::error::{RelayError, Result};
use idearelay_core::history::{HistoryEntry, HistoryRepository, push_capped};
use std::path::PathBuf;

/// Stores the structuring history as one JSON document, newest entry first.
///
/// Every mutation rewrites the whole document; the store has a single
/// writer (the request-handling task), so no further coordination is
/// needed.
pub struct JsonHistoryRepository {
    file: AtomicJsonFile<Vec<HistoryEntry>>,
}

impl JsonHistoryRepository {
    /// Opens the repository at the default location.
    pub fn try_default() -> Result<Self> {
        let path = RelayPaths::history_file()
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
impl HistoryRepository for JsonHistoryRepository {
    async fn load(&self) -> Result<Vec<HistoryEntry>> {
        self.file
            .load()
            .map(Option::unwrap_or_default)
            .map_err(|err| RelayError::data_access(err.to_string()))
    }

    async fn record(&self, entry: HistoryEntry) -> Result<()> {
        self.file
            .update(Vec::new(), |entries| push_capped(entries, entry))
            .map_err(|err| RelayError::data_access(err.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.file
            .update(Vec::new(), |entries| entries.retain(|entry| entry.id != id))
            .map_err(|err| RelayError::data_access(err.to_string()))
    }

    async fn clear(&self) -> Result<()> {
        self.file
            .save(&Vec::new())
            .map_err(|err| RelayError::data_access(err.to_string()))
    }
}
