use crate::embedder::{cosine_similarity, Embedder};
use crate::error::Result;
use crate::types::{RetrievedHit, StoredChunk};
use async_trait::async_trait;
use docbot_chunker::DocumentChunk;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The vector index as the pipeline sees it.
///
/// Four operations are all the core needs; the index's own storage and wire
/// protocol stay behind this trait.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Embed and persist chunks. Re-upserting a document replaces its
    /// previous chunks.
    async fn upsert(&mut self, chunks: Vec<DocumentChunk>) -> Result<()>;

    /// Similarity search: embed the query and return the closest stored
    /// chunks, best first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RetrievedHit>>;

    /// Names of all documents with stored chunks
    async fn stored_sources(&self) -> Result<BTreeSet<String>>;
}

/// In-memory reference store with JSON persistence.
///
/// Scans all stored vectors per query; fine for the document counts this
/// assistant handles. Scores are cosine similarity, higher = better.
pub struct MemoryVectorStore {
    chunks: Vec<StoredChunk>,
    embedder: Arc<dyn Embedder>,
    path: PathBuf,
}

impl MemoryVectorStore {
    /// Create an empty store that will persist to `path`
    pub fn new(path: impl AsRef<Path>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            chunks: Vec::new(),
            embedder,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load a store from `path`, or start empty if the file does not exist
    pub async fn load_or_new(path: impl AsRef<Path>, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new(path, embedder));
        }

        let data = tokio::fs::read_to_string(path).await?;
        let chunks: Vec<StoredChunk> = serde_json::from_str(&data)?;
        log::info!("Loaded {} chunks from {}", chunks.len(), path.display());

        Ok(Self {
            chunks,
            embedder,
            path: path.to_path_buf(),
        })
    }

    /// Persist the store to its path
    pub async fn save(&self) -> Result<()> {
        let data = serde_json::to_string(&self.chunks)?;
        tokio::fs::write(&self.path, data).await?;
        log::info!("Saved {} chunks to {}", self.chunks.len(), self.path.display());
        Ok(())
    }

    /// Number of stored chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn upsert(&mut self, chunks: Vec<DocumentChunk>) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        // Replace previously stored chunks of the incoming documents.
        let incoming: BTreeSet<&str> = chunks.iter().map(|c| c.source.document.as_str()).collect();
        let before = self.chunks.len();
        self.chunks
            .retain(|stored| !incoming.contains(stored.chunk.source.document.as_str()));
        let replaced = before - self.chunks.len();
        if replaced > 0 {
            log::info!("Replacing {replaced} chunks of re-ingested documents");
        }

        let contents: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = self.embedder.embed_batch(&contents).await?;

        for (chunk, vector) in chunks.into_iter().zip(vectors.into_iter()) {
            self.chunks.push(StoredChunk { chunk, vector });
        }

        log::info!("Store now holds {} chunks", self.chunks.len());
        Ok(())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RetrievedHit>> {
        log::debug!("Searching for '{query}' (limit: {limit})");

        let query_vector = self.embedder.embed(query).await?;

        let mut scored: Vec<(f32, &StoredChunk)> = self
            .chunks
            .iter()
            .map(|stored| (cosine_similarity(&query_vector, &stored.vector), stored))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(score, stored)| RetrievedHit {
                text: stored.chunk.content.clone(),
                source: stored.chunk.source.document.clone(),
                page: stored.chunk.source.page,
                score,
                boost: None,
            })
            .collect())
    }

    async fn stored_sources(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .chunks
            .iter()
            .map(|stored| stored.chunk.source.document.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::StubEmbedder;
    use docbot_chunker::ChunkSource;
    use tempfile::TempDir;

    fn chunk(document: &str, page: u32, content: &str) -> DocumentChunk {
        DocumentChunk::new(content.to_string(), ChunkSource::new(document, page))
    }

    fn store(path: &Path) -> MemoryVectorStore {
        MemoryVectorStore::new(path, Arc::new(StubEmbedder::new(64)))
    }

    #[tokio::test]
    async fn exact_text_ranks_first() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir.path().join("store.json"));

        store
            .upsert(vec![
                chunk("a.pdf", 1, "admission requirements for the program"),
                chunk("a.pdf", 2, "cafeteria opening hours"),
            ])
            .await
            .unwrap();

        let hits = store
            .search("admission requirements for the program", 5)
            .await
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "admission requirements for the program");
        assert!((hits[0].score - 1.0).abs() < 1e-5);
        assert!(hits[0].score >= hits[1].score);
    }

    #[tokio::test]
    async fn search_respects_limit_and_carries_provenance() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir.path().join("store.json"));

        store
            .upsert(vec![
                chunk("a.pdf", 1, "one"),
                chunk("b.pdf", 2, "two"),
                chunk("c.pdf", 3, "three"),
            ])
            .await
            .unwrap();

        let hits = store.search("one", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].source, "a.pdf");
        assert_eq!(hits[0].page, 1);
        assert!(hits[0].boost.is_none());
    }

    #[tokio::test]
    async fn reingesting_a_document_replaces_its_chunks() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir.path().join("store.json"));

        store
            .upsert(vec![chunk("a.pdf", 1, "old"), chunk("b.pdf", 1, "kept")])
            .await
            .unwrap();
        store.upsert(vec![chunk("a.pdf", 1, "new")]).await.unwrap();

        assert_eq!(store.len(), 2);
        let sources = store.stored_sources().await.unwrap();
        assert!(sources.contains("a.pdf"));
        assert!(sources.contains("b.pdf"));

        let hits = store.search("new", 10).await.unwrap();
        assert!(hits.iter().all(|h| h.text != "old"));
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = store(&path);
        store
            .upsert(vec![chunk("a.pdf", 4, "persisted content")])
            .await
            .unwrap();
        store.save().await.unwrap();

        let loaded = MemoryVectorStore::load_or_new(&path, Arc::new(StubEmbedder::new(64)))
            .await
            .unwrap();
        assert_eq!(loaded.len(), 1);

        let hits = loaded.search("persisted content", 1).await.unwrap();
        assert_eq!(hits[0].source, "a.pdf");
        assert_eq!(hits[0].page, 4);
    }

    #[tokio::test]
    async fn load_or_new_starts_empty_without_a_file() {
        let dir = TempDir::new().unwrap();
        let loaded = MemoryVectorStore::load_or_new(
            dir.path().join("missing.json"),
            Arc::new(StubEmbedder::new(64)),
        )
        .await
        .unwrap();
        assert!(loaded.is_empty());
        assert!(loaded.stored_sources().await.unwrap().is_empty());
    }
}
