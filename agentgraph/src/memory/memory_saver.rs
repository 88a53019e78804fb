//! In-memory checkpointer for development and tests.

use async_trait::async_trait;
use dashmap::DashMap;

use super::checkpointer::require_thread_id;
use super::{Checkpoint, CheckpointError, Checkpointer, RunnableConfig};

/// Keeps the latest checkpoint per thread in process memory. Lost when dropped.
pub struct MemorySaver<S> {
    threads: DashMap<String, Checkpoint<S>>,
}

impl<S> Default for MemorySaver<S> {
    fn default() -> Self {
        Self {
            threads: DashMap::new(),
        }
    }
}

impl<S> MemorySaver<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of threads with a stored checkpoint.
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let thread_id = require_thread_id(config)?;
        self.threads
            .insert(thread_id.to_string(), checkpoint.clone());
        Ok(checkpoint.id.clone())
    }

    async fn get(&self, config: &RunnableConfig) -> Result<Option<Checkpoint<S>>, CheckpointError> {
        let thread_id = require_thread_id(config)?;
        Ok(self.threads.get(thread_id).map(|c| c.value().clone()))
    }

    async fn delete(&self, thread_id: &str) -> Result<(), CheckpointError> {
        self.threads.remove(thread_id);
        Ok(())
    }
}
