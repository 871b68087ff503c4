use crate::client::{ChatClient, ChatOptions};
use crate::error::{LlmError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    options: ChatOptions,
}

impl OpenAiChatClient {
    pub fn new(base_url: &str, api_key: &str, options: ChatOptions) -> Result<Self> {
        Self::with_timeout(
            base_url,
            api_key,
            options,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Build a client with an explicit per-call timeout. A hung chat
    /// endpoint must not block the whole run indefinitely.
    pub fn with_timeout(
        base_url: &str,
        api_key: &str,
        options: ChatOptions,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            options,
        })
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.options.model,
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: system_prompt,
                },
                WireMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        log::debug!(
            "Chat request: model={}, user prompt {} chars",
            self.options.model,
            user_prompt.len()
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, response).await);
        }

        let body: ChatResponse = response.json().await?;
        let reply = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("reply contained no choices".to_string()))?;

        log::debug!("Chat reply: {} chars", reply.len());
        Ok(reply)
    }
}

async fn classify_status(status: StatusCode, response: reqwest::Response) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth,
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited,
        other => {
            let message = response
                .json::<ApiErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            LlmError::Api {
                status: other.as_u16(),
                message,
            }
        }
    }
}
