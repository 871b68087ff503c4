use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Model selection and sampling parameters for a chat exchange.
///
/// These are configuration, not protocol: every implementation of
/// [`ChatClient`] accepts the same options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Model identifier (e.g. "gpt-4o-mini")
    pub model: String,

    /// Sampling temperature; low by default to favor determinism
    pub temperature: f32,

    /// Optional completion token cap
    pub max_tokens: Option<u32>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            max_tokens: None,
        }
    }
}

/// Hosted chat-completion capability.
///
/// One call is one blocking network exchange. Implementations do not
/// retry: transport and API failures propagate to the caller, which
/// decides whether the run aborts.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a system + user message pair and return the reply text.
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}
