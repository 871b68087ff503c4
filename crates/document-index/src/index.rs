use crate::chunker::TextChunker;
use crate::embedder::Embedder;
use crate::error::{DocumentIndexError, Result};
use crate::pages::load_pages;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A retrieved chunk of document text with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    pub score: f32,
}

struct StoredChunk {
    text: String,
    vector: Vec<f32>,
}

/// In-memory semantic index over one document's chunked text.
///
/// Queries use brute-force cosine similarity. The corpora here are
/// single uploaded documents, so an ANN structure would be overkill.
pub struct DocumentIndex {
    chunks: Vec<StoredChunk>,
}

impl DocumentIndex {
    /// Chunk and embed the document at `path`.
    pub async fn build(
        path: impl AsRef<Path>,
        chunker: &TextChunker,
        embedder: &dyn Embedder,
    ) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Building index for {}", path.display());

        let pages = load_pages(path)?;
        let full_text = pages.join("\n");
        let texts = chunker.chunk(&full_text);
        if texts.is_empty() {
            return Err(DocumentIndexError::EmptyDocument(
                path.display().to_string(),
            ));
        }

        let vectors = embedder.embed_batch(&texts).await?;
        let chunks = texts
            .into_iter()
            .zip(vectors)
            .map(|(text, vector)| StoredChunk { text, vector })
            .collect::<Vec<_>>();

        log::info!("Indexed {} chunks from {}", chunks.len(), path.display());
        Ok(Self { chunks })
    }

    /// Return the `top_k` most similar passages for `query`, highest
    /// score first.
    pub async fn query(
        &self,
        query: &str,
        top_k: usize,
        embedder: &dyn Embedder,
    ) -> Result<Vec<Passage>> {
        log::debug!("Querying index: '{}' (top_k: {})", query, top_k);

        let query_vector = embedder.embed(query).await?;

        let mut scored: Vec<Passage> = self
            .chunks
            .iter()
            .map(|chunk| Passage {
                text: chunk.text.clone(),
                score: cosine_similarity(&query_vector, &chunk.vector),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::StubEmbedder;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_doc(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);

        let c = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &c).abs() < 1e-6);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn build_and_query_returns_ranked_passages() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "reg.txt",
            "Institutions must maintain board oversight of model risk.",
        );
        let embedder = StubEmbedder::new(32);
        let chunker = TextChunker::default();

        let index = DocumentIndex::build(&path, &chunker, &embedder).await.unwrap();
        assert_eq!(index.len(), 1);

        let passages = index.query("board oversight", 4, &embedder).await.unwrap();
        assert_eq!(passages.len(), 1);
        assert!(passages[0].text.contains("board oversight"));
    }

    #[tokio::test]
    async fn query_truncates_to_top_k_descending() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "reg.txt", "alpha\x0cbravo\x0ccharlie\x0cdelta");
        let embedder = StubEmbedder::new(32);
        let chunker = TextChunker::new(6, 2).unwrap();

        let index = DocumentIndex::build(&path, &chunker, &embedder).await.unwrap();
        assert!(index.len() >= 3);

        let passages = index.query("alpha", 2, &embedder).await.unwrap();
        assert_eq!(passages.len(), 2);
        assert!(passages[0].score >= passages[1].score);
    }

    #[tokio::test]
    async fn empty_document_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "empty.txt", "   ");
        let embedder = StubEmbedder::new(8);
        let chunker = TextChunker::default();

        let result = DocumentIndex::build(&path, &chunker, &embedder).await;
        assert!(matches!(result, Err(DocumentIndexError::EmptyDocument(_))));
    }
}
