//! Conversation messages shared by every workflow state.
//!
//! A message is owned by the state that holds it; nodes append new messages and never edit
//! existing ones, except when normalizing raw `{role, content}` input into a typed [`Message`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AgentError;

/// Author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Result of a tool call, answering the assistant message that requested it.
    Tool,
}

impl std::str::FromStr for Role {
    type Err = AgentError;

    /// Accepts the OpenAI names plus the `human` / `ai` aliases used by chat front ends.
    /// Tool messages are produced by the chatbot only, never parsed from raw input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "user" | "human" => Ok(Self::User),
            "assistant" | "ai" => Ok(Self::Assistant),
            other => Err(AgentError::ExecutionFailed(format!(
                "unknown message role: {}",
                other
            ))),
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    /// Raw JSON arguments as returned by the model.
    pub arguments: String,
    pub id: Option<String>,
}

/// One chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Id of the call a `Tool` message answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Assistant turn that asks for `tool_calls`.
    pub fn assistant_with_tool_calls(
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
    ) -> Self {
        Self {
            tool_calls,
            ..Self::assistant(content)
        }
    }

    /// Output of the tool call `tool_call_id`.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::new(Role::Tool, content)
        }
    }

    /// Normalizes a raw `{"role": ..., "content": ...}` object into a typed message.
    ///
    /// Missing `content` is treated as empty; a missing or unknown role is an error.
    pub fn from_value(value: &Value) -> Result<Self, AgentError> {
        let role = value
            .get("role")
            .and_then(Value::as_str)
            .ok_or_else(|| AgentError::ExecutionFailed("message has no role".into()))?
            .parse::<Role>()?;
        let content = value
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(Self::new(role, content))
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Makes `prompt` the leading system message, replacing an existing one.
pub(crate) fn set_system_prompt(messages: &mut Vec<Message>, prompt: String) {
    match messages.first_mut() {
        Some(first) if first.role == Role::System => first.content = prompt,
        _ => messages.insert(0, Message::system(prompt)),
    }
}

/// Returns the content of the most recent user message, if any.
pub fn last_user_content(messages: &[Message]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.is_user())
        .map(|m| m.content.as_str())
}
