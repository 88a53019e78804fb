//! Web-search agent graph: `START → search → END`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::graph::{Node, StateGraph, END, START};
use crate::state::GraphState;

use super::multi_step::MultiStepPlanner;

/// Node id of the single search step.
pub const SEARCH: &str = "search";

/// Web-search workflow state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSearchState {
    pub user_query: String,
    pub answer: String,
}

impl WebSearchState {
    pub fn ask(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            answer: String::new(),
        }
    }
}

impl GraphState for WebSearchState {}

/// Runs the planner for `user_query` and stores the referenced answer.
pub struct SearchNode {
    planner: Arc<MultiStepPlanner>,
}

impl SearchNode {
    pub fn new(planner: Arc<MultiStepPlanner>) -> Self {
        Self { planner }
    }
}

#[async_trait]
impl Node<WebSearchState> for SearchNode {
    fn id(&self) -> &str {
        SEARCH
    }

    async fn run(&self, mut state: WebSearchState) -> Result<WebSearchState, AgentError> {
        let report = self.planner.run(&state.user_query).await?;
        state.answer = report.answer;
        Ok(state)
    }
}

/// Builds the web-search graph around `planner`.
pub fn build_web_search_graph(planner: Arc<MultiStepPlanner>) -> StateGraph<WebSearchState> {
    let mut graph = StateGraph::<WebSearchState>::new();
    graph
        .add_node(SEARCH, Arc::new(SearchNode::new(planner)))
        .add_edge(START, SEARCH)
        .add_edge(SEARCH, END);
    graph
}
