//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile` or `compile_with_checkpointer`. The run loop executes one
//! node at a time, follows static edges or asks the node's router for the next label, and
//! stops when an edge reaches END. When a checkpointer is set and `config.thread_id` is
//! provided, the prior state is loaded before the run and the final state saved after it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AgentError;
use crate::memory::{Checkpoint, Checkpointer, RunnableConfig};
use crate::state::GraphState;
use crate::stream::{StreamEvent, StreamMode};

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_route,
};
use super::node_middleware::NodeMiddleware;
use super::state_graph::{Edge, END, START};
use super::Node;

/// Default maximum number of node executions per invocation.
pub const DEFAULT_RECURSION_LIMIT: usize = 50;

/// Compiled graph: immutable structure, supports invoke and stream.
///
/// Only one invocation per thread id should run at a time; the caller serializes them.
/// Invocations on different threads are independent.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Outgoing edge per node id, plus the entry edge under START.
    pub(super) edges: HashMap<String, Edge<S>>,
    pub(super) checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    pub(super) recursion_limit: usize,
}

struct StreamSink<S: GraphState> {
    tx: mpsc::Sender<StreamEvent<S>>,
    modes: HashSet<StreamMode>,
}

impl<S> StreamSink<S>
where
    S: GraphState,
{
    async fn emit(&self, node_id: &str, state: &S) {
        if self.modes.contains(&StreamMode::Values) {
            let _ = self.tx.send(StreamEvent::Values(state.clone())).await;
        }
        if self.modes.contains(&StreamMode::Updates) {
            let _ = self
                .tx
                .send(StreamEvent::Updates {
                    node_id: node_id.to_string(),
                    state: state.clone(),
                })
                .await;
        }
    }
}

impl<S> CompiledStateGraph<S>
where
    S: GraphState,
{
    /// Runs the graph to a terminal node and returns the final state.
    ///
    /// With a checkpointer and `config.thread_id`, starts from the thread's persisted state
    /// merged with `state` (see [`GraphState::merge_input`]) and saves the final state.
    ///
    /// # Errors
    ///
    /// - `LoopLimitExceeded` when more than the step budget of nodes would run.
    /// - `RouterLabel` when a router returns an undeclared label.
    /// - Node and collaborator errors, unmodified.
    pub async fn invoke(&self, state: S, config: Option<RunnableConfig>) -> Result<S, AgentError> {
        let config = config.unwrap_or_default();
        self.run_loop(state, &config, None).await.map_err(|e| {
            log_graph_error(&e);
            e
        })
    }

    /// Streams graph execution, emitting events via a channel-backed stream.
    ///
    /// A failed run ends the stream with `StreamEvent::Error`.
    pub fn stream(
        &self,
        state: S,
        config: Option<RunnableConfig>,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let sink = StreamSink {
            tx,
            modes: stream_mode.into(),
        };

        tokio::spawn(async move {
            let config = config.unwrap_or_default();
            if let Err(e) = graph.run_loop(state, &config, Some(&sink)).await {
                log_graph_error(&e);
                let _ = sink.tx.send(StreamEvent::Error(e.to_string())).await;
            }
        });

        ReceiverStream::new(rx)
    }

    /// Maximum node executions per invocation unless overridden by `RunnableConfig`.
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    pub fn checkpointer(&self) -> Option<&Arc<dyn Checkpointer<S>>> {
        self.checkpointer.as_ref()
    }

    async fn run_loop(
        &self,
        input: S,
        config: &RunnableConfig,
        sink: Option<&StreamSink<S>>,
    ) -> Result<S, AgentError> {
        let mut state = self.load_state(input, config).await?;
        let limit = config.recursion_limit.unwrap_or(self.recursion_limit);
        let mut current = self.first_node(&state, config).await?;
        log_graph_start(
            config.thread_id.as_deref(),
            current.as_deref().unwrap_or(END),
        );

        let mut steps = 0usize;
        let mut last_node = None;
        while let Some(node_id) = current {
            if steps >= limit {
                return Err(AgentError::LoopLimitExceeded { limit });
            }
            steps += 1;
            log_node_start(&node_id, steps);
            state = self.run_node(&node_id, state).await?;
            if let Some(sink) = sink {
                sink.emit(&node_id, &state).await;
            }
            current = self.next_after(&node_id, &state).await?;
            log_node_complete(&node_id, current.as_deref());
            last_node = Some(node_id);
        }

        self.save_state(&state, config, steps, last_node).await?;
        log_graph_complete(steps);
        Ok(state)
    }

    async fn load_state(&self, input: S, config: &RunnableConfig) -> Result<S, AgentError> {
        let (Some(cp), Some(thread_id)) = (&self.checkpointer, &config.thread_id) else {
            return Ok(input);
        };
        match cp.get(config).await? {
            Some(checkpoint) => {
                tracing::debug!(
                    thread_id = thread_id.as_str(),
                    step = checkpoint.metadata.step,
                    "Resuming from checkpoint"
                );
                Ok(checkpoint.state.merge_input(input))
            }
            None => Ok(input),
        }
    }

    async fn save_state(
        &self,
        state: &S,
        config: &RunnableConfig,
        steps: usize,
        last_node: Option<String>,
    ) -> Result<(), AgentError> {
        if let (Some(cp), Some(_)) = (&self.checkpointer, &config.thread_id) {
            let checkpoint =
                Checkpoint::from_state(state.checkpoint_state(), steps as u64, last_node);
            cp.put(config, &checkpoint).await?;
        }
        Ok(())
    }

    async fn first_node(
        &self,
        state: &S,
        config: &RunnableConfig,
    ) -> Result<Option<String>, AgentError> {
        match &config.resume_at {
            Some(id) if self.nodes.contains_key(id) => Ok(Some(id.clone())),
            Some(id) => Err(AgentError::ExecutionFailed(format!(
                "unknown resume node: {}",
                id
            ))),
            None => self.next_after(START, state).await,
        }
    }

    /// Resolves the node that follows `from`; `None` means END.
    async fn next_after(&self, from: &str, state: &S) -> Result<Option<String>, AgentError> {
        let edge = self
            .edges
            .get(from)
            .ok_or_else(|| AgentError::ExecutionFailed(format!("no edge from node: {}", from)))?;
        let target = match edge {
            Edge::Static(to) => to.clone(),
            Edge::Conditional(cond) => {
                let label = cond.router.route_label(from, state).await?;
                let to = cond
                    .path_map
                    .get(label)
                    .ok_or_else(|| AgentError::RouterLabel {
                        node: from.to_string(),
                        label: label.to_string(),
                    })?
                    .clone();
                log_route(from, label, &to);
                to
            }
        };
        Ok((target != END).then_some(target))
    }

    async fn run_node(&self, node_id: &str, state: S) -> Result<S, AgentError> {
        let node = self
            .nodes
            .get(node_id)
            .cloned()
            .ok_or_else(|| AgentError::ExecutionFailed(format!("node not found: {}", node_id)))?;
        match &self.middleware {
            Some(middleware) => {
                middleware
                    .around_run(
                        node_id,
                        state,
                        Box::new(move |s| Box::pin(async move { node.run(s).await })),
                    )
                    .await
            }
            None => node.run(state).await,
        }
    }
}
