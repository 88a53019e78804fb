//! Invoke config: thread id, resumption point and step budget.
//!
//! Passed to `CompiledStateGraph::invoke` / `stream` and to [`Checkpointer`](super::Checkpointer).

/// Config for a single invoke.
///
/// When the graph has a checkpointer, `thread_id` selects the persisted conversation: the
/// prior state is loaded before the run and the final state saved after it.
#[derive(Debug, Clone, Default)]
pub struct RunnableConfig {
    /// Unique id for this conversation/thread. Required when using a checkpointer.
    pub thread_id: Option<String>,
    /// Node to start from instead of the graph entry (externally-determined resumption point).
    pub resume_at: Option<String>,
    /// Per-invocation override of the graph's maximum node executions.
    pub recursion_limit: Option<usize>,
}

impl RunnableConfig {
    /// Config bound to a conversation thread.
    pub fn for_thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            ..Default::default()
        }
    }

    pub fn with_resume_at(mut self, node_id: impl Into<String>) -> Self {
        self.resume_at = Some(node_id.into());
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }
}
