use crate::error::{DocumentIndexError, Result};
use serde::{Deserialize, Serialize};

/// Sliding-window chunker for prose documents.
///
/// Sizes are in characters. Windows advance by `chunk_size -
/// chunk_overlap` so each chunk repeats the tail of its predecessor,
/// which keeps sentences that straddle a boundary retrievable from
/// either side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunker {
    /// Target window size in characters
    pub chunk_size: usize,

    /// Characters shared with the previous window
    pub chunk_overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: 1500,
            chunk_overlap: 200,
        }
    }
}

impl TextChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        let chunker = Self {
            chunk_size,
            chunk_overlap,
        };
        chunker.validate()?;
        Ok(chunker)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DocumentIndexError::InvalidConfig(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(DocumentIndexError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Split `text` into overlapping windows. A final window shorter
    /// than `chunk_size` is kept; whitespace-only windows are dropped.
    ///
    /// The fields are public for serde, so a chunker that skipped
    /// [`TextChunker::new`] may carry an overlap at or above the window
    /// size. The stride is clamped to at least one character here, which
    /// keeps the walk terminating for any field values.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let stride = self.chunk_size.saturating_sub(self.chunk_overlap).max(1);
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            if !window.trim().is_empty() {
                chunks.push(window);
            }
            if end == chars.len() {
                break;
            }
            start += stride;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_chunker_is_valid() {
        let chunker = TextChunker::default();
        assert!(chunker.validate().is_ok());
        assert_eq!(chunker.chunk_size, 1500);
        assert_eq!(chunker.chunk_overlap, 200);
    }

    #[test]
    fn rejects_overlap_not_smaller_than_size() {
        assert!(TextChunker::new(100, 100).is_err());
        assert!(TextChunker::new(0, 0).is_err());
        assert!(TextChunker::new(100, 20).is_ok());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunker = TextChunker::default();
        let chunks = chunker.chunk("risk tiering procedures");
        assert_eq!(chunks, vec!["risk tiering procedures".to_string()]);
    }

    #[test]
    fn windows_overlap_by_configured_amount() {
        let chunker = TextChunker::new(10, 4).unwrap();
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks[0], "abcdefghij");
        assert_eq!(chunks[1], "ghijklmnop");
        // Each window repeats the last 4 chars of its predecessor.
        assert_eq!(&chunks[0][6..], &chunks[1][..4]);
        // Final short chunk is kept.
        assert!(chunks.last().unwrap().ends_with('z'));
    }

    #[test]
    fn unvalidated_overlap_does_not_panic_or_loop() {
        // Construct directly, bypassing new(), as deserialized config can.
        let inverted = TextChunker {
            chunk_size: 4,
            chunk_overlap: 6,
        };
        let chunks = inverted.chunk("abcdefgh");
        assert!(!chunks.is_empty());
        assert_eq!(chunks[0], "abcd");

        let zero_stride = TextChunker {
            chunk_size: 4,
            chunk_overlap: 4,
        };
        let chunks = zero_stride.chunk("abcdefgh");
        assert_eq!(chunks[0], "abcd");
        assert!(chunks.last().unwrap().ends_with('h'));
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = TextChunker::default();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   \n  ").is_empty());
    }
}
