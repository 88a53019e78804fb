//! ingest_data node: loads `data_list` into the retriever.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::retriever::Retriever;

use super::state::SelfRagState;
use super::INGEST_DATA;

pub struct IngestDataNode {
    retriever: Arc<dyn Retriever>,
}

impl IngestDataNode {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl Node<SelfRagState> for IngestDataNode {
    fn id(&self) -> &str {
        INGEST_DATA
    }

    async fn run(&self, state: SelfRagState) -> Result<SelfRagState, AgentError> {
        let chunks = self.retriever.insert(&state.data_list).await?;
        tracing::info!(texts = state.data_list.len(), chunks, "Ingested data");
        Ok(state)
    }
}
