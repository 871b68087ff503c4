use crate::error::Result;
use crate::prompts;
use crate::topics::{select_topic, split_candidates};
use reggap_document_index::load_pages;
use reggap_llm_client::ChatClient;
use std::path::Path;

/// Generates probing topics from selected pages of a document.
pub struct ProbeGenerator<'a> {
    chat: &'a dyn ChatClient,
}

impl<'a> ProbeGenerator<'a> {
    pub fn new(chat: &'a dyn ChatClient) -> Self {
        Self { chat }
    }

    /// Ask the chat collaborator for a single probing question covering
    /// the selected pages, preferring the delimited second segment of
    /// the reply.
    pub async fn generate(&self, pages: &[usize], document_path: impl AsRef<Path>) -> Result<String> {
        let reply = self.raw_reply(pages, document_path).await?;
        Ok(select_topic(&reply))
    }

    /// All candidate topics the probe reply carries, capped at `max`.
    ///
    /// Splitting the raw reply (instead of first collapsing it to one
    /// segment) lets a multi-question reply contribute up to `max`
    /// topics.
    pub async fn candidates(
        &self,
        pages: &[usize],
        document_path: impl AsRef<Path>,
        max: usize,
    ) -> Result<Vec<String>> {
        let reply = self.raw_reply(pages, document_path).await?;
        Ok(split_candidates(&reply, max))
    }

    /// One chat exchange over the selected pages of the document at
    /// `document_path`.
    ///
    /// Page indices `>= page count` are skipped, not errored; selection
    /// order is preserved in the prompt text. Chat transport errors
    /// propagate uncaught.
    async fn raw_reply(&self, pages: &[usize], document_path: impl AsRef<Path>) -> Result<String> {
        let page_texts = load_pages(document_path)?;

        let selected: Vec<&str> = pages
            .iter()
            .filter(|&&index| index < page_texts.len())
            .map(|&index| page_texts[index].as_str())
            .collect();

        log::debug!(
            "Probe over {} of {} selected pages ({} available)",
            selected.len(),
            pages.len(),
            page_texts.len()
        );

        let joined = selected.join("\n");
        self.chat
            .chat(prompts::SYSTEM_PERSONA, &prompts::probe_prompt(&joined))
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedChat;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn out_of_range_pages_are_excluded_from_the_prompt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "page zero\x0cpage one").unwrap();

        let chat = ScriptedChat::with_replies(vec!["What is required?".to_string()]);
        let probe = ProbeGenerator::new(&chat);

        let topic = probe.generate(&[1, 9], &path).await.unwrap();
        assert_eq!(topic, "What is required?");

        let (_, user_prompt) = chat.exchanges()[0].clone();
        assert!(user_prompt.contains("page one"));
        assert!(!user_prompt.contains("page zero"));
    }

    #[tokio::test]
    async fn selected_pages_are_joined_in_selection_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "alpha\x0cbravo\x0ccharlie").unwrap();

        let chat = ScriptedChat::with_replies(vec!["topic".to_string()]);
        let probe = ProbeGenerator::new(&chat);
        probe.generate(&[2, 0], &path).await.unwrap();

        let (_, user_prompt) = chat.exchanges()[0].clone();
        assert!(user_prompt.contains("charlie\nalpha"));
    }

    #[tokio::test]
    async fn multi_candidate_reply_selects_second_segment() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "content").unwrap();

        let chat = ScriptedChat::with_replies(vec![
            "Candidates *** Which controls are mandated? *** extra".to_string(),
        ]);
        let probe = ProbeGenerator::new(&chat);

        let topic = probe.generate(&[0], &path).await.unwrap();
        assert_eq!(topic, "Which controls are mandated?");
    }

    #[tokio::test]
    async fn candidates_keep_every_delimited_question_up_to_the_cap() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "content").unwrap();

        let chat = ScriptedChat::with_replies(vec![
            "What deadline applies? *** What encryption is required? *** Who signs off?"
                .to_string(),
        ]);
        let probe = ProbeGenerator::new(&chat);

        let candidates = probe.candidates(&[0], &path, 2).await.unwrap();
        assert_eq!(
            candidates,
            vec![
                "What deadline applies?".to_string(),
                "What encryption is required?".to_string(),
            ]
        );
    }
}
