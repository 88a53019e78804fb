//! Shared state, nodes and routes for state graph tests.

use std::sync::Arc;

use agentgraph::{AgentError, GraphState, Node, Route};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Records the order nodes ran in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceState {
    pub visits: Vec<String>,
    pub inputs: Vec<String>,
}

impl GraphState for TraceState {
    fn merge_input(mut self, input: Self) -> Self {
        self.inputs.extend(input.inputs);
        self
    }
}

/// Appends its id to `visits`.
pub struct RecordNode {
    id: String,
}

impl RecordNode {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self { id: id.to_string() })
    }
}

#[async_trait]
impl Node<TraceState> for RecordNode {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, mut state: TraceState) -> Result<TraceState, AgentError> {
        state.visits.push(self.id.clone());
        Ok(state)
    }
}

/// Always fails.
pub struct FailingNode;

#[async_trait]
impl Node<TraceState> for FailingNode {
    fn id(&self) -> &str {
        "fail"
    }

    async fn run(&self, _state: TraceState) -> Result<TraceState, AgentError> {
        Err(AgentError::ExecutionFailed("retriever unavailable".into()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Retry {
    Again,
    Done,
}

impl Route for Retry {
    fn variants() -> &'static [Self] {
        &[Self::Again, Self::Done]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Again => "retry",
            Self::Done => "done",
        }
    }
}

/// Outcome set that declares only `Accept`, while its router can still produce `Reject`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Narrow {
    Accept,
    Reject,
}

impl Route for Narrow {
    fn variants() -> &'static [Self] {
        &[Self::Accept]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}
