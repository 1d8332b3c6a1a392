//! Interview endpoint.
//!
//! POST /api/interview

use super::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use idearelay_application::{InterviewAction, InterviewReply, InterviewTurn};
use idearelay_core::RelayError;
use idearelay_core::message::ChatMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewRequest {
    pub action: Option<InterviewAction>,
    pub transcript: Option<String>,
    /// Selected category id (historically named `mode` on the wire).
    #[serde(alias = "mode")]
    pub category: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub existing_prompt: Option<String>,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_prompt: Option<String>,
}

/// Handles one interview turn.
pub async fn interview(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewResponse>, ApiError> {
    let action = request
        .action
        .ok_or_else(|| RelayError::validation("Missing interview action"))?;

    let turn = InterviewTurn {
        action,
        transcript: request.transcript,
        category: request.category,
        messages: request.messages,
        existing_prompt: request.existing_prompt,
    };

    let reply = state.interview.handle(turn).await?;
    let response = match reply {
        InterviewReply::Message(message) => InterviewResponse {
            message: Some(message),
            ..InterviewResponse::default()
        },
        InterviewReply::Complete { final_prompt } => InterviewResponse {
            is_complete: Some(true),
            final_prompt: Some(final_prompt),
            ..InterviewResponse::default()
        },
    };
    Ok(Json(response))
}
