//! Idea draft domain model.
//!
//! An `IdeaDraft` captures everything the composer screen collects before a
//! structuring request: the raw (spoken or typed) idea text, selected
//! categories and modifiers, detail/format preferences, free-form context,
//! and any attached file or URL content.

use crate::catalog::{DetailLevel, OutputFormat};
use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};

/// A text attachment supplied with a draft (file name plus extracted text).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    pub name: String,
    pub content: String,
}

/// A URL reference supplied with a draft (fetched content plus metadata).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlReference {
    pub title: String,
    pub url: String,
    pub content: String,
    /// Source kind hint ("article", "video", ...); informational only.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Everything a structuring request needs, in one value object.
///
/// Only `transcript` is required; every other field has a safe default.
/// The draft is owned by a single composer session and discarded once a
/// structuring request succeeds and lands in history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaDraft {
    /// The raw idea text. Must be non-empty after trimming.
    pub transcript: String,
    /// Selected category ids; empty means a general improvement idea.
    pub categories: Vec<String>,
    pub detail_level: DetailLevel,
    pub output_format: OutputFormat,
    /// Selected modifier ids; unknown ids are dropped during assembly.
    pub modifiers: Vec<String>,
    /// Free-form additional context.
    pub context_info: String,
    pub attachments: Vec<Attachment>,
    pub url_references: Vec<UrlReference>,
}

impl IdeaDraft {
    /// Creates a draft from just the idea text.
    pub fn from_transcript(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            ..Self::default()
        }
    }

    /// Rejects drafts whose idea text is empty after trimming.
    ///
    /// This is the validation gate: an empty transcript never reaches the
    /// LLM collaborator or the fallback generator.
    pub fn validate(&self) -> Result<()> {
        if self.transcript.trim().is_empty() {
            return Err(RelayError::validation("No idea text provided"));
        }
        Ok(())
    }

    /// Comma-joined category ids, used as the history tag.
    pub fn category_tag(&self) -> String {
        self.categories.join(", ")
    }
}
