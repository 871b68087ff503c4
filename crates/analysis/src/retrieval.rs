use crate::error::{AnalysisError, Result};
use crate::prompts;
use reggap_document_index::{DocumentIndex, Embedder};
use reggap_llm_client::ChatClient;

/// Questions shorter than this (trimmed) are rejected as garbage probes.
const MIN_QUERY_CHARS: usize = 10;

/// Secondary refusal phrasing some prompts elicit instead of the fixed
/// fallback.
const INCOMPLETE_QUERY_PHRASE: &str = "query incomplete";

/// Whether a reply is a refusal rather than a substantive answer.
///
/// Matching strategy is a case-insensitive substring check; it is
/// deliberately the only place that knows the phrases, so it can be
/// swapped without touching callers.
pub fn is_fallback(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("no such requirement") || lowered.contains(INCOMPLETE_QUERY_PHRASE)
}

/// Retrieve an answer for `question` from `index`, grounded in the
/// `top_k` nearest passages.
///
/// Returns the empty string when the model signals it found nothing;
/// downstream distinguishes "no real answer" from substantive answers
/// by emptiness alone.
pub async fn retrieve(
    index: &DocumentIndex,
    embedder: &dyn Embedder,
    chat: &dyn ChatClient,
    question: &str,
    top_k: usize,
) -> Result<String> {
    let question = question.trim();
    if question.chars().count() < MIN_QUERY_CHARS {
        return Err(AnalysisError::InvalidQuery);
    }

    let passages = index.query(question, top_k, embedder).await?;
    log::debug!("Retrieved {} passages for '{question}'", passages.len());

    let reply = chat
        .chat(
            prompts::SYSTEM_PERSONA,
            &prompts::retrieval_prompt(question, &passages),
        )
        .await?;

    if is_fallback(&reply) {
        log::debug!("Fallback reply for '{question}', normalizing to empty");
        Ok(String::new())
    } else {
        Ok(reply.trim().to_string())
    }
}
