//! Prompt templates for the chat collaborator.
//!
//! All exchanges are two messages: the shared analyst persona as the
//! system role plus one task-specific user prompt.

use reggap_document_index::Passage;

pub const SYSTEM_PERSONA: &str = "You are a regulatory compliance analyst. You compare \
regulatory texts against internal policy documents and answer precisely, without speculation.";

/// Fixed phrase the retrieval prompt asks the model to emit when the
/// passages cannot support an answer.
pub const FALLBACK_PHRASE: &str = "no such requirement is found";

pub fn probe_prompt(page_text: &str) -> String {
    format!(
        "The following text is taken from selected pages of a document under review:\n\n\
         {page_text}\n\n\
         Produce a concise probing question that names the key regulatory requirements \
         covered by this text, suitable for checking whether an internal policy addresses \
         them. If several distinct questions apply, separate them with \"***\"."
    )
}

pub fn retrieval_prompt(question: &str, passages: &[Passage]) -> String {
    let mut prompt = String::from("Relevant passages:\n\n");
    for (i, passage) in passages.iter().enumerate() {
        prompt.push_str(&format!("[{}] {}\n\n", i + 1, passage.text));
    }
    prompt.push_str(&format!(
        "Question: {question}\n\n\
         Answer strictly from the passages above. If the passages are insufficient to \
         answer, reply exactly: \"{FALLBACK_PHRASE}\"."
    ));
    prompt
}

pub fn compare_prompt(regulatory_answer: &str, policy_answer: &str) -> String {
    format!(
        "Regulatory answer:\n{regulatory_answer}\n\n\
         Policy answer:\n{policy_answer}\n\n\
         List only the requirements that are present in the regulatory answer but \
         missing from the policy answer. Do not list requirements both documents share."
    )
}

pub fn draft_prompt(joined_findings: &str) -> String {
    format!(
        "The following gap findings were identified between a regulatory document and \
         an internal policy document:\n\n{joined_findings}\n\n\
         Draft consolidated policy language that closes these gaps. Keep the drafted \
         clauses specific to the findings above."
    )
}

pub fn synthesis_prompt(draft: &str) -> String {
    format!(
        "Drafted policy update:\n\n{draft}\n\n\
         Produce the final response for the policy owner: summarize the identified gaps \
         and present the drafted policy update ready for review."
    )
}
