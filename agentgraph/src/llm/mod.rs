//! LLM client abstraction used by every workflow node that talks to a model.
//!
//! Nodes depend on a callable that returns assistant text (and optional tool calls); this
//! module defines the trait, a scripted mock for tests and, behind feature `openai`, a
//! Chat Completions client.

mod json;
mod mock;
mod template;

#[cfg(feature = "openai")]
mod openai;

pub use json::extract_json_object;
pub use mock::MockLlm;
pub use template::fill_template;

#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

/// Shape the caller expects the model to answer in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Free text.
    #[default]
    Text,
    /// A single JSON object. Clients ask the model for JSON but callers must still validate it.
    Json,
}

/// Response from an LLM completion: assistant message text and optional tool calls.
///
/// **Interaction**: Returned by `LlmClient::invoke()`; nodes append `content` as a new
/// assistant message or parse it (graders, planner).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
    /// Tool calls from this turn; empty when the model answered in text.
    pub tool_calls: Vec<ToolCall>,
}

impl LlmResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }
}

/// LLM client: given messages, returns assistant text and optional tool_calls.
///
/// Implementations: `MockLlm` (scripted responses), `ChatOpenAI` (real API, feature `openai`).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn: read messages, return assistant content and optional tool_calls.
    /// Aligns with LangChain's `invoke` / `ainvoke` (single-call API).
    async fn invoke(
        &self,
        messages: &[Message],
        format: ResponseFormat,
    ) -> Result<LlmResponse, AgentError>;

    /// One text turn in which the model may call any of `tools`.
    ///
    /// The default ignores the tools, for clients without tool calling.
    async fn invoke_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError> {
        let _ = tools;
        self.invoke(messages, ResponseFormat::Text).await
    }
}
