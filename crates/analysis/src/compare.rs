use crate::error::Result;
use crate::prompts;
use reggap_llm_client::ChatClient;

/// Marker substituted for an empty regulatory-side answer, so the model
/// sees an explicit token instead of a blank section.
const NO_REGULATORY_ANSWER: &str = "[No Gov answer]";

/// Marker substituted for an empty policy-side answer.
const NO_POLICY_ANSWER: &str = "[No PRA answer]";

/// Compares the per-topic answers from both indexes and lists the
/// requirements missing from the policy side.
pub struct GapComparer<'a> {
    chat: &'a dyn ChatClient,
}

impl<'a> GapComparer<'a> {
    pub fn new(chat: &'a dyn ChatClient) -> Self {
        Self { chat }
    }

    /// One chat exchange; the reply is free text, returned trimmed.
    pub async fn compare(&self, regulatory_answer: &str, policy_answer: &str) -> Result<String> {
        let regulatory = if regulatory_answer.is_empty() {
            NO_REGULATORY_ANSWER
        } else {
            regulatory_answer
        };
        let policy = if policy_answer.is_empty() {
            NO_POLICY_ANSWER
        } else {
            policy_answer
        };

        let reply = self
            .chat
            .chat(
                prompts::SYSTEM_PERSONA,
                &prompts::compare_prompt(regulatory, policy),
            )
            .await?;

        Ok(reply.trim().to_string())
    }
}
