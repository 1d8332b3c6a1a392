//! Structuring history: model, capping rules, and repository trait.
//!
//! Every successful structuring (one-shot or interview) produces one
//! history entry. The store keeps the 50 most recent entries, newest
//! first, evicting the oldest on overflow.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Maximum number of retained history entries.
pub const HISTORY_CAP: usize = 50;

/// One recorded structuring result.
///
/// An entry is only created after a non-empty final document exists; the
/// document never contains the interview completion sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier (UUID format).
    pub id: String,
    /// Creation timestamp (ISO 8601 format).
    pub created_at: String,
    /// The raw idea text the document was generated from.
    pub transcript: String,
    /// The generated submission document.
    pub prompt: String,
    /// Comma-joined category ids selected at generation time.
    pub category_tag: String,
}

impl HistoryEntry {
    /// Creates a new entry stamped with a fresh id and the current time.
    pub fn new(
        transcript: impl Into<String>,
        prompt: impl Into<String>,
        category_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            transcript: transcript.into(),
            prompt: prompt.into(),
            category_tag: category_tag.into(),
        }
    }
}

/// Prepends an entry and evicts beyond [`HISTORY_CAP`] (oldest first).
///
/// Entries are ordered newest first, so eviction truncates the tail.
pub fn push_capped(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    entries.insert(0, entry);
    entries.truncate(HISTORY_CAP);
}

/// Persistence contract for the structuring history.
///
/// Implementations replace the whole document on every mutation; there is a
/// single writer per store, so no transactional guarantees are required.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Returns all retained entries, newest first.
    async fn load(&self) -> Result<Vec<HistoryEntry>>;

    /// Records a new entry, applying the retention cap.
    async fn record(&self, entry: HistoryEntry) -> Result<()>;

    /// Deletes a single entry by id (no error if absent).
    async fn delete(&self, id: &str) -> Result<()>;

    /// Deletes all entries.
    async fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            id: format!("id-{n}"),
            created_at: format!("2026-01-01T00:00:{n:02}Z"),
            transcript: format!("idea {n}"),
            prompt: format!("document {n}"),
            category_tag: "workflow".to_string(),
        }
    }

    #[test]
    fn test_push_prepends_newest() {
        let mut entries = vec![entry(1)];
        push_capped(&mut entries, entry(2));
        assert_eq!(entries[0].id, "id-2");
        assert_eq!(entries[1].id, "id-1");
    }

    #[test]
    fn test_cap_evicts_oldest_fifo() {
        let mut entries = Vec::new();
        for n in 0..HISTORY_CAP {
            push_capped(&mut entries, entry(n));
        }
        assert_eq!(entries.len(), HISTORY_CAP);

        // The 51st insert retains exactly 50, dropping the oldest (id-0)
        push_capped(&mut entries, entry(999));
        assert_eq!(entries.len(), HISTORY_CAP);
        assert_eq!(entries[0].id, "id-999");
        assert!(!entries.iter().any(|e| e.id == "id-0"));
        assert!(entries.iter().any(|e| e.id == "id-1"));
    }

    #[test]
    fn test_new_entry_has_unique_ids() {
        let a = HistoryEntry::new("t", "p", "c");
        let b = HistoryEntry::new("t", "p", "c");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_string(&entry(1)).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"categoryTag\""));
    }
}
