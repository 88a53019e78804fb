//! Agent execution error types.
//!
//! Returned by `Node::run`, routers, collaborators (LLM, retriever, search) and by
//! `CompiledStateGraph::invoke`. Build-time topology errors live in
//! [`CompilationError`](crate::graph::CompilationError) instead.

use thiserror::Error;

use crate::memory::CheckpointError;

/// Run-time error for one graph invocation.
///
/// Collaborator failures are carried as `ExecutionFailed` and propagate unmodified; the
/// engine never retries or suppresses them. `RouterLabel` and `LoopLimitExceeded` are
/// structural engine errors.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed, retriever unavailable).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// A router returned a label that is not one of its declared outcomes.
    #[error("router on node {node} returned undeclared label: {label}")]
    RouterLabel { node: String, label: String },

    /// The invocation ran more nodes than the configured step budget.
    #[error("workflow exceeded loop limit of {limit} node executions")]
    LoopLimitExceeded { limit: usize },

    /// Loading or saving the thread checkpoint failed.
    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
}
