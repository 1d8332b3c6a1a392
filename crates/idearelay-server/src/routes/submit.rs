//! Submission endpoint.
//!
//! POST /api/submit-idea

use super::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitIdeaRequest {
    #[serde(alias = "document")]
    pub idea: String,
    pub categories: Vec<String>,
    #[serde(alias = "submitterIdentity")]
    pub submitter_email: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitIdeaResponse {
    pub success: bool,
    pub message: String,
}

/// Delivers a finished submission to the fixed recipient.
pub async fn submit_idea(
    State(state): State<AppState>,
    Json(request): Json<SubmitIdeaRequest>,
) -> Result<Json<SubmitIdeaResponse>, ApiError> {
    state
        .submission
        .submit(
            &request.idea,
            &request.categories,
            request.submitter_email.as_deref(),
        )
        .await?;

    Ok(Json(SubmitIdeaResponse {
        success: true,
        message: "Idea submitted successfully!".to_string(),
    }))
}
