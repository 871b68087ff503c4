//! Delimiter-based splitting of topic candidates out of free-text
//! replies.
//!
//! The chat collaborator returns candidates separated by a literal
//! `"***"` (or, with older prompt phrasings, the word `"Topic"`).
//! Splitting free text on a literal substring is an inherently fragile
//! contract, so it lives behind these two functions only.
//!
//! TODO: request a numbered-list (structured) reply from the model and
//! retire the delimiter matching.

const PRIMARY_DELIMITER: &str = "***";
const LEGACY_DELIMITER: &str = "Topic";

fn segments(reply: &str) -> Vec<&str> {
    let delimiter = if reply.contains(PRIMARY_DELIMITER) {
        PRIMARY_DELIMITER
    } else {
        LEGACY_DELIMITER
    };
    reply.split(delimiter).collect()
}

/// Select a single topic from a raw probe reply.
///
/// If the split produces a non-empty segment at index 1, that segment
/// is the topic; otherwise the whole trimmed reply is.
pub fn select_topic(reply: &str) -> String {
    let parts = segments(reply);
    match parts.get(1).map(|s| s.trim()) {
        Some(second) if !second.is_empty() => second.to_string(),
        _ => reply.trim().to_string(),
    }
}

/// All non-empty trimmed candidate topics in a raw probe reply, capped
/// at `max`. A reply with no delimiter yields itself as the single
/// candidate.
pub fn split_candidates(reply: &str, max: usize) -> Vec<String> {
    segments(reply)
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .take(max)
        .collect()
}
