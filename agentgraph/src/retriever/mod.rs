//! Document retrieval: the collaborator the self-RAG graph reads evidence from.
//!
//! [`Retriever`] is the capability nodes close over. [`InMemoryRetriever`] embeds chunks with
//! any [`Embedder`] and ranks them by cosine similarity; [`HashingEmbedder`] gives it a
//! deterministic, offline embedding so the CLI and tests run without an embeddings service.

mod embedder;
mod in_memory;

pub use embedder::{cosine_similarity, Embedder, HashingEmbedder};
pub use in_memory::InMemoryRetriever;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Metadata attached to a stored chunk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    /// Where the chunk came from (file path, URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Disabled documents stay stored but are never returned by `retrieve`.
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            source: None,
            enabled: true,
            extra: serde_json::Map::new(),
        }
    }
}

/// One retrieved chunk of text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: DocumentMetadata::default(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }
}

/// Retrieval capability.
///
/// **Interaction**: `retrieve` is called by the self-RAG `retrieve` node, `insert` by
/// `ingest_data`. Errors propagate to the engine as fatal for the invocation.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Returns up to `top_k` enabled documents, most similar first.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Document>, AgentError>;

    /// Stores `texts` and returns the number of chunks added.
    async fn insert(&self, texts: &[String]) -> Result<usize, AgentError>;
}
