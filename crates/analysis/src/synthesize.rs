use crate::error::Result;
use crate::prompts;
use reggap_llm_client::ChatClient;

/// Separator between gap findings in the joined draft input.
pub const FINDING_SEPARATOR: &str = "\n\n---\n\n";

/// Turns accumulated gap findings into drafted policy language, then
/// into the user-facing synthesis. Two chat exchanges.
pub struct DraftSynthesizer<'a> {
    chat: &'a dyn ChatClient,
}

impl<'a> DraftSynthesizer<'a> {
    pub fn new(chat: &'a dyn ChatClient) -> Self {
        Self { chat }
    }

    pub async fn synthesize(&self, findings: &[String]) -> Result<String> {
        let joined = findings.join(FINDING_SEPARATOR);
        log::info!("Synthesizing draft from {} findings", findings.len());

        let draft = self
            .chat
            .chat(prompts::SYSTEM_PERSONA, &prompts::draft_prompt(&joined))
            .await?;

        let synthesis = self
            .chat
            .chat(prompts::SYSTEM_PERSONA, &prompts::synthesis_prompt(&draft))
            .await?;

        Ok(synthesis.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedChat;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn joined_findings_flow_into_draft_then_synthesis() {
        let chat = ScriptedChat::with_replies(vec![
            "drafted clauses".to_string(),
            "final synthesis".to_string(),
        ]);
        let synthesizer = DraftSynthesizer::new(&chat);

        let findings = vec!["gap one".to_string(), "gap two".to_string()];
        let result = synthesizer.synthesize(&findings).await.unwrap();
        assert_eq!(result, "final synthesis");

        let exchanges = chat.exchanges();
        assert_eq!(exchanges.len(), 2);
        assert!(exchanges[0].1.contains("gap one"));
        assert!(exchanges[0].1.contains(FINDING_SEPARATOR.trim()));
        assert!(exchanges[0].1.contains("gap two"));
        assert!(exchanges[1].1.contains("drafted clauses"));
    }
}
