//! get_user_query node: latest user message becomes the working question.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::message::last_user_content;

use super::config::TranslationConfig;
use super::state::SelfRagState;
use super::translate::translate;
use super::GET_USER_QUERY;

/// Sets `user_query` from the last user message, translated when input translation is on.
pub struct GetUserQueryNode {
    llm: Arc<dyn LlmClient>,
    translation: TranslationConfig,
}

impl GetUserQueryNode {
    pub fn new(llm: Arc<dyn LlmClient>, translation: TranslationConfig) -> Self {
        Self { llm, translation }
    }
}

#[async_trait]
impl Node<SelfRagState> for GetUserQueryNode {
    fn id(&self) -> &str {
        GET_USER_QUERY
    }

    async fn run(&self, mut state: SelfRagState) -> Result<SelfRagState, AgentError> {
        let query = last_user_content(&state.messages)
            .ok_or_else(|| AgentError::ExecutionFailed("conversation has no user message".into()))?
            .to_string();
        state.user_query = if self.translation.enabled {
            translate(self.llm.as_ref(), &query, &self.translation.language).await?
        } else {
            query
        };
        Ok(state)
    }
}
