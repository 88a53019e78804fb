//! In-process vector store: word-window chunking, embeddings, cosine ranking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::AgentError;

use super::embedder::{cosine_similarity, Embedder};
use super::{Document, Retriever};

/// Default chunk length in whitespace-separated words.
const DEFAULT_CHUNK_WORDS: usize = 200;
/// Default overlap between consecutive chunks, in words.
const DEFAULT_CHUNK_OVERLAP: usize = 40;

struct Entry {
    document: Document,
    embedding: Vec<f32>,
}

/// Retriever over chunks kept in memory.
///
/// Inserted texts are split into overlapping word windows; ties in similarity fall back to
/// insertion order so results are deterministic.
pub struct InMemoryRetriever {
    embedder: Arc<dyn Embedder>,
    entries: DashMap<u64, Entry>,
    next_id: AtomicU64,
    chunk_words: usize,
    chunk_overlap: usize,
}

impl InMemoryRetriever {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            entries: DashMap::new(),
            next_id: AtomicU64::new(0),
            chunk_words: DEFAULT_CHUNK_WORDS,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }

    /// Sets the chunk window; overlap is clamped below the window length.
    pub fn with_chunking(mut self, chunk_words: usize, chunk_overlap: usize) -> Self {
        self.chunk_words = chunk_words.max(1);
        self.chunk_overlap = chunk_overlap.min(self.chunk_words - 1);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores already-chunked documents as given (metadata included).
    pub async fn insert_documents(&self, documents: Vec<Document>) -> Result<usize, AgentError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;
        if embeddings.len() != documents.len() {
            return Err(AgentError::ExecutionFailed(format!(
                "embedder returned {} vectors for {} documents",
                embeddings.len(),
                documents.len()
            )));
        }
        let added = documents.len();
        for (document, embedding) in documents.into_iter().zip(embeddings) {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            self.entries.insert(
                id,
                Entry {
                    document,
                    embedding,
                },
            );
        }
        tracing::debug!(added, total = self.entries.len(), "Inserted documents");
        Ok(added)
    }

    /// Enables or disables every chunk whose `metadata.source` equals `source`.
    /// Returns the number of chunks updated.
    pub fn set_enabled(&self, source: &str, enabled: bool) -> usize {
        let mut updated = 0;
        for mut entry in self.entries.iter_mut() {
            if entry.document.metadata.source.as_deref() == Some(source) {
                entry.document.metadata.enabled = enabled;
                updated += 1;
            }
        }
        updated
    }

    fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }
        let step = self.chunk_words.saturating_sub(self.chunk_overlap).max(1);
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + self.chunk_words).min(words.len());
            chunks.push(words[start..end].join(" "));
            if end == words.len() {
                break;
            }
            start += step;
        }
        chunks
    }
}

#[async_trait]
impl Retriever for InMemoryRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Document>, AgentError> {
        let query_embedding = self
            .embedder
            .embed(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::ExecutionFailed("embedder returned no vector".into()))?;

        let mut scored: Vec<(f32, u64, Document)> = self
            .entries
            .iter()
            .filter(|e| e.document.metadata.enabled)
            .map(|e| {
                (
                    cosine_similarity(&query_embedding, &e.embedding),
                    *e.key(),
                    e.document.clone(),
                )
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        Ok(scored.into_iter().take(top_k).map(|(_, _, d)| d).collect())
    }

    async fn insert(&self, texts: &[String]) -> Result<usize, AgentError> {
        let documents: Vec<Document> = texts
            .iter()
            .flat_map(|t| self.chunk(t))
            .map(Document::new)
            .collect();
        self.insert_documents(documents).await
    }
}
