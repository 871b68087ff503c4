//! Test doubles for the chat collaborator.
//!
//! Kept in the library (not behind `cfg(test)`) so integration tests
//! and downstream crates can drive the pipeline without a network.

use async_trait::async_trait;
use reggap_llm_client::{ChatClient, LlmError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Chat double that replays a fixed queue of replies and records every
/// exchange it was sent.
pub struct ScriptedChat {
    replies: Mutex<VecDeque<String>>,
    exchanges: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl ScriptedChat {
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            exchanges: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A chat double whose every call fails, for abort-path tests.
    pub fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            exchanges: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Every `(system, user)` prompt pair sent so far, in order.
    pub fn exchanges(&self) -> Vec<(String, String)> {
        self.exchanges
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> reggap_llm_client::Result<String> {
        self.exchanges
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((system_prompt.to_string(), user_prompt.to_string()));

        if self.fail {
            return Err(LlmError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        self.replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| LlmError::InvalidResponse("scripted replies exhausted".to_string()))
    }
}
