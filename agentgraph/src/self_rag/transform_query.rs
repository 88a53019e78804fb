//! transform_query node: rewrites the question for better retrieval.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::{fill_template, LlmClient, ResponseFormat};
use crate::message::Message;

use super::prompts::REWRITE_PROMPT;
use super::state::SelfRagState;
use super::TRANSFORM_QUERY;

pub struct TransformQueryNode {
    llm: Arc<dyn LlmClient>,
}

impl TransformQueryNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<SelfRagState> for TransformQueryNode {
    fn id(&self) -> &str {
        TRANSFORM_QUERY
    }

    async fn run(&self, mut state: SelfRagState) -> Result<SelfRagState, AgentError> {
        let prompt = fill_template(REWRITE_PROMPT, &[("question", state.user_query.as_str())]);
        let response = self
            .llm
            .invoke(&[Message::user(prompt)], ResponseFormat::Text)
            .await?;
        let rewritten = response.content.trim();
        if rewritten.is_empty() {
            tracing::warn!(query = %state.user_query, "Query rewrite was empty, keeping query");
        } else {
            tracing::warn!(from = %state.user_query, to = rewritten, "Rephrased user query");
            state.user_query = rewritten.to_string();
        }
        Ok(state)
    }
}
