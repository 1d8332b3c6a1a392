//! OpenRouterAgent - Direct REST API implementation for OpenRouter.
//!
//! This agent calls the OpenRouter chat-completions API directly.
//! Configuration priority: ~/.config/idearelay/secret.json > environment variables

use async_trait::async_trait;
use idearelay_core::agent::{AgentError, CompletionAgent};
use idearelay_core::message::ChatMessage;
use idearelay_infrastructure::storage::SecretStorage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;

const BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model used for one-shot structuring requests.
pub const STRUCTURING_MODEL: &str = "anthropic/claude-opus-4";

/// Model used for interview turns (cheaper, lower latency).
pub const INTERVIEW_MODEL: &str = "anthropic/claude-3.5-haiku";

/// Token budget for a structuring response.
pub const STRUCTURING_MAX_TOKENS: u32 = 2000;

/// Token budget for a single interview turn.
pub const INTERVIEW_MAX_TOKENS: u32 = 1000;

const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Agent implementation that talks to the OpenRouter HTTP API.
#[derive(Clone)]
pub struct OpenRouterAgent {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenRouterAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: STRUCTURING_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Loads configuration from ~/.config/idearelay/secret.json or environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/idearelay/secret.json
    /// 2. Environment variables (OPENROUTER_API_KEY, OPENROUTER_MODEL)
    ///
    /// Model name defaults to the structuring model if not specified.
    pub fn try_from_env() -> Result<Self, AgentError> {
        if let Ok(storage) = SecretStorage::new() {
            if let Ok(secret_config) = storage.load() {
                if let Some(openrouter_config) = secret_config.openrouter {
                    let model = openrouter_config
                        .model
                        .unwrap_or_else(|| STRUCTURING_MODEL.to_string());
                    return Ok(Self::new(openrouter_config.api_key, model));
                }
            }
        }

        // Fallback to environment variables
        let api_key = env::var("OPENROUTER_API_KEY").map_err(|_| AgentError::NotConfigured)?;
        let model =
            env::var("OPENROUTER_MODEL").unwrap_or_else(|_| STRUCTURING_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|message| WireMessage {
                    role: message.role.as_str(),
                    content: &message.content,
                })
                .collect(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    async fn send_request(
        &self,
        body: &ChatCompletionRequest<'_>,
    ) -> Result<String, AgentError> {
        let response = self
            .client
            .post(BASE_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::Process {
                status_code: None,
                message: format!("OpenRouter request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenRouter error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            AgentError::InvalidResponse(format!("Failed to parse OpenRouter response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionAgent for OpenRouterAgent {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, AgentError> {
        if messages.is_empty() {
            return Err(AgentError::process("OpenRouter payload must include at least one message"));
        }

        tracing::debug!(
            model = %self.model,
            message_count = messages.len(),
            "sending completion request"
        );

        let request = self.build_request(messages);
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, AgentError> {
    response
        .choices
        .into_iter()
        .find_map(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(AgentError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> AgentError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AgentError::Process {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
    }
}
