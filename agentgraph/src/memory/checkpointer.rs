//! Checkpointer trait: per-thread state persistence.

use async_trait::async_trait;
use thiserror::Error;

use super::{Checkpoint, RunnableConfig};

/// Error from a checkpointer backend.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The config carries no thread id.
    #[error("thread_id is required for checkpointing")]
    ThreadIdRequired,

    /// State could not be encoded or decoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Backend storage failed (e.g. SQLite error).
    #[error("storage failed: {0}")]
    Storage(String),
}

/// Saves and loads the latest state of each conversation thread.
///
/// The engine is the only writer: it calls `get` before an invocation and `put` after it.
/// Writes are last-writer-wins; callers serialize invocations per thread id.
#[async_trait]
pub trait Checkpointer<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Overwrites the thread's checkpoint. Returns the stored checkpoint id.
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError>;

    /// Loads the thread's checkpoint, or `None` for a new thread.
    async fn get(&self, config: &RunnableConfig) -> Result<Option<Checkpoint<S>>, CheckpointError>;

    /// Removes the thread's checkpoint. Missing threads are not an error.
    async fn delete(&self, thread_id: &str) -> Result<(), CheckpointError>;
}

pub(super) fn require_thread_id(config: &RunnableConfig) -> Result<&str, CheckpointError> {
    config
        .thread_id
        .as_deref()
        .ok_or(CheckpointError::ThreadIdRequired)
}
