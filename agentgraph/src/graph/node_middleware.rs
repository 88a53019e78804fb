//! Node middleware: wraps every node run of a compiled graph.
//!
//! Used for cross-cutting concerns such as enter/exit logging or timing. Attached with
//! `StateGraph::with_middleware`.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::state::GraphState;

/// Future returned by the wrapped node run.
pub type NodeRunFuture<S> = Pin<Box<dyn Future<Output = Result<S, AgentError>> + Send>>;

/// The node run handed to the middleware; call it at most once.
pub type NodeRunFn<S> = Box<dyn FnOnce(S) -> NodeRunFuture<S> + Send>;

/// Around-run hook for node execution.
///
/// Implementations must call `inner(state)` to run the node and should return its result
/// (possibly after inspecting it).
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: GraphState,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S>,
    ) -> Result<S, AgentError>;
}
