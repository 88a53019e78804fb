//! Logging middleware that reports node enter/exit around each node run.

use std::time::Instant;

use agentgraph::{AgentError, GraphState, NodeMiddleware, NodeRunFn};
use async_trait::async_trait;

/// Logs node enter/exit with elapsed time via `tracing`.
///
/// The subscriber writes to stderr, so agent output on stdout can be redirected separately.
pub struct LoggingMiddleware;

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingMiddleware
where
    S: GraphState,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S>,
    ) -> Result<S, AgentError> {
        tracing::debug!(node = node_id, "enter node");
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(node = node_id, elapsed_ms, "exit node"),
            Err(e) => tracing::warn!(node = node_id, elapsed_ms, error = %e, "node failed"),
        }
        result
    }
}
