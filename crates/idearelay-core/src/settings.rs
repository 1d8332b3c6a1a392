//! Last-used composer settings: model, legacy migration, repository trait.

use crate::catalog::{DetailLevel, OutputFormat};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The category selection and preferences last used by the composer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub categories: Vec<String>,
    pub detail_level: DetailLevel,
    pub output_format: OutputFormat,
    pub modifiers: Vec<String>,
}

impl Settings {
    /// Best-effort decoding of a persisted settings blob.
    ///
    /// Older blobs carried the multi-category field as `modes` and, before
    /// that, a single-category `mode` string; both migrate into
    /// `categories`. Unknown detail/format values fall back to defaults so
    /// a stale blob can never fail the load.
    pub fn from_stored(value: serde_json::Value) -> Self {
        let read_ids = |key: &str| -> Vec<String> {
            value
                .get(key)
                .and_then(|ids| ids.as_array())
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| id.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut categories = read_ids("categories");
        if categories.is_empty() {
            categories = read_ids("modes");
        }
        if categories.is_empty() {
            // Legacy single-category field
            if let Some(mode) = value.get("mode").and_then(|mode| mode.as_str()) {
                if !mode.is_empty() {
                    categories = vec![mode.to_string()];
                }
            }
        }

        let detail_level = value
            .get("detailLevel")
            .and_then(|level| level.as_str())
            .map(DetailLevel::parse_or_default)
            .unwrap_or_default();
        let output_format = value
            .get("outputFormat")
            .and_then(|format| format.as_str())
            .map(OutputFormat::parse_or_default)
            .unwrap_or_default();

        Self {
            categories,
            detail_level,
            output_format,
            modifiers: read_ids("modifiers"),
        }
    }
}

/// Persistence contract for the last-used settings blob.
///
/// Writes are whole-document replacements by a single writer.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the stored settings, or defaults when nothing is stored.
    async fn load(&self) -> Result<Settings>;

    /// Replaces the stored settings.
    async fn save(&self, settings: &Settings) -> Result<()>;
}
