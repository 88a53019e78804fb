//! Graph node trait: one step in a StateGraph.
//!
//! Receives state `S`, returns the updated `S`. Routing lives on the graph edges, not in the
//! node. Nodes may call collaborators they close over (LLM, retriever) but keep no mutable
//! state between invocations.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::state::GraphState;

/// One step in a graph: state in, state out.
///
/// **Interaction**: Registered with `StateGraph::add_node`; run by
/// `CompiledStateGraph::invoke`. Errors abort the invocation unchanged.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: GraphState,
{
    /// Node id (e.g. `"retrieve"`, `"chat"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step: state in, state out.
    async fn run(&self, state: S) -> Result<S, AgentError>;
}
