//! generate_answer node: answers the question from the relevant documents.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::{fill_template, LlmClient, ResponseFormat};
use crate::message::Message;

use super::prompts::ANSWER_PROMPT;
use super::state::SelfRagState;
use super::GENERATE_ANSWER;

pub struct GenerateAnswerNode {
    llm: Arc<dyn LlmClient>,
}

impl GenerateAnswerNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<SelfRagState> for GenerateAnswerNode {
    fn id(&self) -> &str {
        GENERATE_ANSWER
    }

    async fn run(&self, mut state: SelfRagState) -> Result<SelfRagState, AgentError> {
        let context = state
            .relevant_docs
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = fill_template(
            ANSWER_PROMPT,
            &[("context", context.as_str()), ("question", state.user_query.as_str())],
        );
        let response = self
            .llm
            .invoke(&[Message::user(prompt)], ResponseFormat::Text)
            .await?;
        state.answer = response.content;
        Ok(state)
    }
}
