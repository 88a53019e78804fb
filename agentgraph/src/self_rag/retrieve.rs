//! retrieve node: top-K documents for the working question.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::retriever::Retriever;

use super::state::SelfRagState;
use super::RETRIEVE;

pub struct RetrieveNode {
    retriever: Arc<dyn Retriever>,
    top_k: usize,
}

impl RetrieveNode {
    pub fn new(retriever: Arc<dyn Retriever>, top_k: usize) -> Self {
        Self { retriever, top_k }
    }
}

#[async_trait]
impl Node<SelfRagState> for RetrieveNode {
    fn id(&self) -> &str {
        RETRIEVE
    }

    async fn run(&self, mut state: SelfRagState) -> Result<SelfRagState, AgentError> {
        state.relevant_docs = self
            .retriever
            .retrieve(&state.user_query, self.top_k)
            .await?;
        tracing::debug!(docs = state.relevant_docs.len(), "Retrieved documents");
        Ok(state)
    }
}
