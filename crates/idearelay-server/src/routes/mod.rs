//! HTTP routes and the error-to-status mapping.

pub mod generate;
pub mod history;
pub mod interview;
pub mod submit;

use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post};
use idearelay_core::RelayError;
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-prompt", post(generate::generate_prompt))
        .route("/api/interview", post(interview::interview))
        .route("/api/submit-idea", post(submit::submit_idea))
        .route(
            "/api/history",
            get(history::list_history).delete(history::clear_history),
        )
        .route("/api/history/{id}", delete(history::delete_history_entry))
        .route("/api/settings", get(history::get_settings))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Wire shape of every error reply.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Request-boundary error with an HTTP status.
///
/// All collaborator errors are caught here and converted to a structured
/// `{error}` response; none propagate as raw failures to the caller.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A second structuring request arrived while one was in flight.
    pub fn generation_in_flight() -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: "A generation request is already in progress".to_string(),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let (status, message) = match err {
            RelayError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            RelayError::NotConfigured { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Email service not configured. Please contact your administrator.".to_string(),
            ),
            RelayError::Collaborator(message) => (StatusCode::BAD_GATEWAY, message),
            RelayError::NotFound { entity_type, id } => (
                StatusCode::NOT_FOUND,
                format!("Entity not found: {entity_type} '{id}'"),
            ),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (RelayError::validation("empty"), StatusCode::BAD_REQUEST),
            (
                RelayError::not_configured("email"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (RelayError::collaborator("down"), StatusCode::BAD_GATEWAY),
            (
                RelayError::internal("bug"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let api_err: ApiError = err.into();
            assert_eq!(api_err.status, expected);
        }
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let api_err: ApiError = RelayError::internal("secret path /etc/foo").into();
        assert_eq!(api_err.message, "Internal server error");
    }
}
