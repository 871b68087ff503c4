use crate::chunker::TextChunker;
use crate::embedder::Embedder;
use crate::error::Result;
use crate::index::DocumentIndex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared cache of built indexes, keyed by canonical source path.
///
/// Embedding a document is the only expensive step in a run, so
/// repeated runs against the same uploaded document reuse the built
/// index instead of re-embedding. The map lock is held across a build,
/// which serializes concurrent builds for the same path.
#[derive(Default)]
pub struct IndexCache {
    entries: Mutex<HashMap<PathBuf, Arc<DocumentIndex>>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached index for `path`, building it on first use.
    pub async fn get_or_build(
        &self,
        path: impl AsRef<Path>,
        chunker: &TextChunker,
        embedder: &dyn Embedder,
    ) -> Result<Arc<DocumentIndex>> {
        let path = path.as_ref();
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let mut entries = self.entries.lock().await;
        if let Some(index) = entries.get(&key) {
            log::debug!("Index cache hit for {}", key.display());
            return Ok(index.clone());
        }

        let index = Arc::new(DocumentIndex::build(path, chunker, embedder).await?);
        entries.insert(key, index.clone());
        Ok(index)
    }

    /// Drop a cached index, forcing a rebuild on next use.
    pub async fn invalidate(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.entries.lock().await.remove(&key);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
