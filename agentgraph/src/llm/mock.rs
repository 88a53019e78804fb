//! Scripted LLM client for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, ResponseFormat};
use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

/// Mock LLM: returns queued responses in order, then a fixed fallback.
///
/// Records every request, and the tools offered with it, so tests can assert on prompts and
/// call counts.
///
/// **Interaction**: Implements `LlmClient`; used in unit and integration tests.
pub struct MockLlm {
    script: Mutex<VecDeque<Result<LlmResponse, String>>>,
    fallback: String,
    requests: Mutex<Vec<Vec<Message>>>,
    offered_tools: Mutex<Vec<Vec<String>>>,
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlm {
    /// Empty script; every call returns an empty string.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: String::new(),
            requests: Mutex::new(Vec::new()),
            offered_tools: Mutex::new(Vec::new()),
        }
    }

    /// Always answers `content`.
    pub fn with_fallback(content: impl Into<String>) -> Self {
        Self {
            fallback: content.into(),
            ..Self::new()
        }
    }

    /// Answers each of `responses` once, in order, then the fallback.
    pub fn scripted<I, T>(responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mock = Self::new();
        for r in responses {
            mock.push(r);
        }
        mock
    }

    /// Queues one more response.
    pub fn push(&self, content: impl Into<String>) -> &Self {
        self.lock_script().push_back(Ok(LlmResponse::text(content)));
        self
    }

    /// Queues a reply that asks for `tool_calls` and has no text.
    pub fn push_tool_calls(&self, tool_calls: Vec<ToolCall>) -> &Self {
        self.lock_script().push_back(Ok(LlmResponse {
            content: String::new(),
            tool_calls,
        }));
        self
    }

    /// Queues a failed call; `invoke` returns `ExecutionFailed(message)`.
    pub fn push_error(&self, message: impl Into<String>) -> &Self {
        self.lock_script().push_back(Err(message.into()));
        self
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    /// Messages passed to each call, oldest first.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.lock_requests().clone()
    }

    /// Tool names offered with each call, oldest first; empty for plain `invoke`.
    pub fn offered_tools(&self) -> Vec<Vec<String>> {
        self.offered_tools
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn respond(
        &self,
        messages: &[Message],
        tools: Vec<String>,
    ) -> Result<LlmResponse, AgentError> {
        self.lock_requests().push(messages.to_vec());
        self.offered_tools
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tools);
        let next = self.lock_script().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(AgentError::ExecutionFailed(message)),
            None => Ok(LlmResponse::text(self.fallback.clone())),
        }
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<LlmResponse, String>>> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<Vec<Message>>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(
        &self,
        messages: &[Message],
        _format: ResponseFormat,
    ) -> Result<LlmResponse, AgentError> {
        self.respond(messages, Vec::new())
    }

    async fn invoke_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError> {
        self.respond(messages, tools.iter().map(|t| t.name.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Scripted responses come back in order, then the fallback repeats.
    #[tokio::test]
    async fn scripted_then_fallback() {
        let llm = MockLlm::with_fallback("done");
        llm.push("one").push("two");
        let msgs = [Message::user("hi")];
        let mut out = Vec::new();
        for _ in 0..4 {
            out.push(llm.invoke(&msgs, ResponseFormat::Text).await.unwrap().content);
        }
        assert_eq!(out, ["one", "two", "done", "done"]);
        assert_eq!(llm.call_count(), 4);
        assert_eq!(llm.requests()[0], msgs.to_vec());
    }

    /// **Scenario**: A queued error surfaces as ExecutionFailed.
    #[tokio::test]
    async fn queued_error_fails_call() {
        let llm = MockLlm::new();
        llm.push_error("rate limited");
        let err = llm.invoke(&[], ResponseFormat::Json).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(m) if m == "rate limited"));
    }

    /// **Scenario**: Queued tool calls come back as-is and offered tool names are recorded.
    #[tokio::test]
    async fn tool_calls_and_offered_tools() {
        let llm = MockLlm::new();
        let call = ToolCall {
            name: "web_search".into(),
            arguments: r#"{"query": "rust"}"#.into(),
            id: Some("call_1".into()),
        };
        llm.push_tool_calls(vec![call.clone()]).push("final");
        let spec = ToolSpec {
            name: "web_search".into(),
            description: None,
            input_schema: serde_json::json!({"type": "object"}),
        };

        let first = llm.invoke_with_tools(&[], &[spec]).await.unwrap();
        assert_eq!(first.tool_calls, vec![call]);
        assert!(first.content.is_empty());
        let second = llm.invoke(&[], ResponseFormat::Text).await.unwrap();
        assert_eq!(second.content, "final");
        assert_eq!(
            llm.offered_tools(),
            vec![vec!["web_search".to_string()], Vec::<String>::new()]
        );
    }
}
