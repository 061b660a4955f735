//! Thin client for the hosted Messages API.
//!
//! Web search, web fetch and citation extraction all happen on the provider
//! side; this client only toggles the tools and carries the content blocks.

use std::time::Duration;

use async_trait::async_trait;
use futures::{channel::mpsc::UnboundedSender, StreamExt};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::ApiMessage,
    services::stream_accumulator::{SseDecoder, StreamAccumulator},
};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThinkingConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub budget_tokens: u32,
}

impl ThinkingConfig {
    pub fn enabled(budget_tokens: u32) -> Self {
        Self {
            kind: "enabled".to_string(),
            budget_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
    /// Sent as the `anthropic-beta` header, not in the body.
    #[serde(skip)]
    pub beta: Option<String>,
}

/// The provider's final message. Content blocks are kept as raw JSON so
/// they can be replayed verbatim on the next turn.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub content: Vec<Value>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Value>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    async fn create_message(&self, request: MessageRequest) -> AppResult<AssistantMessage>;

    /// Streams the reply, forwarding each non-empty text delta to `text_sink`,
    /// and returns the folded final message.
    async fn stream_message(
        &self,
        request: MessageRequest,
        text_sink: UnboundedSender<String>,
    ) -> AppResult<AssistantMessage>;
}

pub struct AnthropicClient {
    client: Client,
    api_key: SecretString,
    messages_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: SecretString, base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            messages_url: format!("{}/v1/messages", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.require_api_key()?,
            &config.anthropic_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    async fn send(&self, request: &MessageRequest) -> AppResult<Response> {
        log::info!(
            "Calling Messages API (model={}, messages={}, tools={}, stream={})",
            request.model,
            request.messages.len(),
            request.tools.len(),
            request.stream
        );

        let mut builder = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json");
        if let Some(beta) = &request.beta {
            builder = builder.header("anthropic-beta", beta);
        }

        let response = builder.json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            log::warn!("Messages API returned {}", status);
            return Err(map_http_error(status, &body));
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatCompletionClient for AnthropicClient {
    async fn create_message(&self, mut request: MessageRequest) -> AppResult<AssistantMessage> {
        request.stream = false;
        let response = self.send(&request).await?;
        let message: AssistantMessage = response.json().await?;
        Ok(message)
    }

    async fn stream_message(
        &self,
        mut request: MessageRequest,
        text_sink: UnboundedSender<String>,
    ) -> AppResult<AssistantMessage> {
        request.stream = true;
        let response = self.send(&request).await?;

        let mut decoder = SseDecoder::new();
        let mut accumulator = StreamAccumulator::new();
        let mut body = response.bytes_stream();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for event in decoder.push(&chunk) {
                apply_event(&mut accumulator, &event.data, &text_sink)?;
            }
            if accumulator.is_stopped() {
                break;
            }
        }
        if let Some(event) = decoder.finish() {
            apply_event(&mut accumulator, &event.data, &text_sink)?;
        }

        accumulator.finish()
    }
}

fn apply_event(
    accumulator: &mut StreamAccumulator,
    data: &str,
    text_sink: &UnboundedSender<String>,
) -> AppResult<()> {
    if data.trim().is_empty() {
        return Ok(());
    }
    let event: Value = serde_json::from_str(data)?;
    if let Some(text) = accumulator.apply(&event)? {
        // A closed sink only means the listener went away; the turn still completes.
        let _ = text_sink.unbounded_send(text);
    }
    Ok(())
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub fn map_http_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());

    if status == StatusCode::TOO_MANY_REQUESTS {
        AppError::RateLimited(message)
    } else {
        AppError::Upstream {
            status: status.as_u16(),
            message,
        }
    }
}
