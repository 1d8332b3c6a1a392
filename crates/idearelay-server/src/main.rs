//! IdeaRelay HTTP server.

mod routes;
mod state;

use crate::state::AppState;
use std::env;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:8787";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("idearelay=info,tower_http=info")),
        )
        .init();

    let state = AppState::from_env()?;

    let addr: SocketAddr = env::var("IDEARELAY_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("IdeaRelay listening on http://{addr}");

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown requested");
    }
}

#[cfg(test)]
mod tests {
    use crate::routes;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use idearelay_infrastructure::{JsonHistoryRepository, JsonSettingsRepository};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    /// State with no agent (fallback generator) and no mailer.
    fn test_state(dir: &TempDir) -> AppState {
        AppState::new(
            None,
            None,
            None,
            Arc::new(JsonHistoryRepository::with_path(
                dir.path().join("history.json"),
            )),
            Arc::new(JsonSettingsRepository::with_path(
                dir.path().join("settings.json"),
            )),
        )
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generate_prompt_fallback_path() {
        let dir = TempDir::new().unwrap();
        let app = routes::router(test_state(&dir));

        let response = app
            .oneshot(post(
                "/api/generate-prompt",
                json!({
                    "transcript": "Add e-sign to disclosures",
                    "categories": ["doc-mgmt"]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let prompt = body["prompt"].as_str().unwrap();
        assert!(prompt.starts_with("# Doc Management Idea"));
        assert!(prompt.contains("Add e-sign to disclosures"));
    }

    #[tokio::test]
    async fn test_generate_prompt_rejects_empty_transcript() {
        let dir = TempDir::new().unwrap();
        let app = routes::router(test_state(&dir));

        let response = app
            .oneshot(post("/api/generate-prompt", json!({"transcript": "  "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("No idea text"));
    }

    #[tokio::test]
    async fn test_generate_prompt_conflict_while_in_flight() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let _permit = state.generation_gate.try_acquire().unwrap();
        let app = routes::router(state);

        let response = app
            .oneshot(post(
                "/api/generate-prompt",
                json!({"transcript": "anything"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_generate_records_history() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let app = routes::router(state);

        let response = app
            .clone()
            .oneshot(post(
                "/api/generate-prompt",
                json!({"transcript": "Speed up handoffs", "categories": ["handoff"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/api/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["transcript"], "Speed up handoffs");
        assert_eq!(entries[0]["categoryTag"], "handoff");
    }

    #[tokio::test]
    async fn test_interview_start_enhance_greeting() {
        let dir = TempDir::new().unwrap();
        let app = routes::router(test_state(&dir));

        let response = app
            .oneshot(post(
                "/api/interview",
                json!({
                    "action": "start",
                    "existingPrompt": "## Existing submission"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("already have an idea submission")
        );
        assert!(body.get("isComplete").is_none());
    }

    #[tokio::test]
    async fn test_interview_completion_reply_shape() {
        let dir = TempDir::new().unwrap();
        let app = routes::router(test_state(&dir));

        let response = app
            .oneshot(post(
                "/api/interview",
                json!({
                    "action": "generate",
                    "transcript": "Automate condition clearing",
                    "mode": "conditions",
                    "messages": [
                        {"role": "assistant", "content": "q1"},
                        {"role": "user", "content": "a1"}
                    ]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["isComplete"], true);
        assert!(
            body["finalPrompt"]
                .as_str()
                .unwrap()
                .contains("Automate condition clearing")
        );
    }

    #[tokio::test]
    async fn test_interview_missing_action_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let app = routes::router(test_state(&dir));
        let response = app
            .oneshot(post("/api/interview", json!({"transcript": "idea"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_idea_empty_document_rejected() {
        let dir = TempDir::new().unwrap();
        let app = routes::router(test_state(&dir));
        let response = app
            .oneshot(post("/api/submit-idea", json!({"idea": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_idea_without_mailer_is_service_unavailable() {
        let dir = TempDir::new().unwrap();
        let app = routes::router(test_state(&dir));
        let response = app
            .oneshot(post("/api/submit-idea", json!({"idea": "## Idea"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn test_settings_endpoint_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let app = routes::router(test_state(&dir));
        let response = app
            .oneshot(Request::builder().uri("/api/settings").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["detailLevel"], "balanced");
        assert_eq!(body["outputFormat"], "structured");
    }
}
