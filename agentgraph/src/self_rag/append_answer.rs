//! append_answer node: appends the accepted answer to the conversation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::message::Message;

use super::config::TranslationConfig;
use super::prompts::NO_ANSWER;
use super::state::SelfRagState;
use super::translate::translate;
use super::APPEND_ANSWER;

/// Appends one assistant message: the answer (translated when output translation is on), or
/// a fixed "don't know" reply when no relevant documents survived grading.
pub struct AppendAnswerNode {
    llm: Arc<dyn LlmClient>,
    translation: TranslationConfig,
}

impl AppendAnswerNode {
    pub fn new(llm: Arc<dyn LlmClient>, translation: TranslationConfig) -> Self {
        Self { llm, translation }
    }
}

#[async_trait]
impl Node<SelfRagState> for AppendAnswerNode {
    fn id(&self) -> &str {
        APPEND_ANSWER
    }

    async fn run(&self, mut state: SelfRagState) -> Result<SelfRagState, AgentError> {
        let reply = if state.relevant_docs.is_empty() {
            NO_ANSWER.to_string()
        } else if self.translation.enabled {
            tracing::info!(language = %self.translation.language, "Translating answer");
            translate(self.llm.as_ref(), &state.answer, &self.translation.language).await?
        } else {
            state.answer.clone()
        };
        state.messages.push(Message::assistant(reply));
        Ok(state)
    }
}
