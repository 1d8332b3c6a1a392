//! One-shot structuring endpoint.
//!
//! POST /api/generate-prompt

use super::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use idearelay_core::catalog::{DetailLevel, OutputFormat};
use idearelay_core::draft::{Attachment, IdeaDraft, UrlReference};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratePromptRequest {
    pub transcript: String,
    #[serde(alias = "modes")]
    pub categories: Vec<String>,
    /// Legacy single-category field, migrated into `categories`.
    pub mode: Option<String>,
    pub detail_level: Option<String>,
    pub output_format: Option<String>,
    pub modifiers: Vec<String>,
    pub context_info: String,
    pub attachments: Vec<Attachment>,
    pub url_references: Vec<UrlReference>,
}

impl GeneratePromptRequest {
    fn into_draft(self) -> IdeaDraft {
        let mut categories = self.categories;
        if categories.is_empty() {
            if let Some(mode) = self.mode.filter(|mode| !mode.is_empty()) {
                categories.push(mode);
            }
        }
        IdeaDraft {
            transcript: self.transcript,
            categories,
            detail_level: self
                .detail_level
                .as_deref()
                .map(DetailLevel::parse_or_default)
                .unwrap_or_default(),
            output_format: self
                .output_format
                .as_deref()
                .map(OutputFormat::parse_or_default)
                .unwrap_or_default(),
            modifiers: self.modifiers,
            context_info: self.context_info,
            attachments: self.attachments,
            url_references: self.url_references,
        }
    }
}

#[derive(Serialize)]
pub struct GeneratePromptResponse {
    pub prompt: String,
}

/// Handles one structuring request.
///
/// Holds the generation gate for the duration of the call: a concurrent
/// request is answered with 409, and the permit releases on drop, so an
/// aborted request frees the gate without producing a history entry.
pub async fn generate_prompt(
    State(state): State<AppState>,
    Json(request): Json<GeneratePromptRequest>,
) -> Result<Json<GeneratePromptResponse>, ApiError> {
    let Some(_permit) = state.generation_gate.try_acquire() else {
        return Err(ApiError::generation_in_flight());
    };

    let draft = request.into_draft();
    let prompt = state.structuring.generate(&draft).await?;
    Ok(Json(GeneratePromptResponse { prompt }))
}
