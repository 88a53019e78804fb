//! Tools the chatbot model may call.
//!
//! A [`Tool`] advertises a [`ToolSpec`] (name, description, JSON Schema of its arguments) that
//! the LLM client forwards to the model, and runs with the arguments the model chose.
//! [`WebSearchTool`] answers with results from any [`SearchEngine`](crate::search::SearchEngine).

mod web_search;

pub use web_search::{WebSearchTool, WEB_SEARCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AgentError;

/// Tool description sent to the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    /// JSON Schema of the arguments object.
    pub input_schema: Value,
}

/// A callable tool.
///
/// **Interaction**: `ChatNode` offers every tool's `spec()` through
/// `LlmClient::invoke_with_tools` and runs `call` for each tool call in the reply.
#[async_trait]
pub trait Tool: Send + Sync {
    fn spec(&self) -> ToolSpec;

    /// Runs the tool with the model's parsed arguments; the returned text becomes the tool
    /// message.
    async fn call(&self, args: Value) -> Result<String, AgentError>;
}
