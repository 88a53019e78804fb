//! Multi-turn chatbot: `START → chat → END`, compiled with a checkpointer so each turn
//! resumes the stored conversation.
//!
//! With tools, the chat step offers them to the model. When the reply asks for tool calls,
//! every call runs, its output is appended as a tool message and the model is asked once more,
//! without tools, for the final answer.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::graph::{Node, StateGraph, END, START};
use crate::llm::{LlmClient, ResponseFormat};
use crate::message::{set_system_prompt, Message, ToolCall};
use crate::state::{append_messages, GraphState};
use crate::tools::{Tool, ToolSpec};

/// Node id of the chat step.
pub const CHAT: &str = "chat";

/// Chatbot state: the conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatState {
    pub messages: Vec<Message>,
}

impl ChatState {
    pub fn say(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(content)],
        }
    }

    /// Content of the last message, if any.
    pub fn last_reply(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

impl GraphState for ChatState {
    fn merge_input(self, input: Self) -> Self {
        Self {
            messages: append_messages(self.messages, input.messages),
        }
    }
}

/// Chatbot configuration. The system prompt sent to the model is
/// `system_prompt + system_prompt_tail`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub system_prompt: Option<String>,
    pub system_prompt_tail: Option<String>,
}

impl ChatConfig {
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_system_prompt_tail(mut self, tail: impl Into<String>) -> Self {
        self.system_prompt_tail = Some(tail.into());
        self
    }

    fn full_system_prompt(&self) -> String {
        format!(
            "{}{}",
            self.system_prompt.as_deref().unwrap_or_default(),
            self.system_prompt_tail.as_deref().unwrap_or_default()
        )
    }
}

/// Puts the configured system prompt first, then appends the model's reply (after one tool
/// round when the model asks for tools).
pub struct ChatNode {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    tools: Vec<Arc<dyn Tool>>,
}

impl ChatNode {
    pub fn new(llm: Arc<dyn LlmClient>, config: &ChatConfig) -> Self {
        Self {
            llm,
            system_prompt: config.full_system_prompt(),
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    /// Runs each call in order and returns one tool message per call.
    ///
    /// Unknown tools, unparsable arguments and tool failures abort the turn.
    async fn call_tools(&self, calls: &[ToolCall]) -> Result<Vec<Message>, AgentError> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            let tool = self
                .tools
                .iter()
                .find(|t| t.spec().name == call.name)
                .ok_or_else(|| {
                    AgentError::ExecutionFailed(format!("unknown tool: {}", call.name))
                })?;
            let args = if call.arguments.trim().is_empty() {
                serde_json::Value::Object(serde_json::Map::new())
            } else {
                serde_json::from_str(&call.arguments).map_err(|e| {
                    AgentError::ExecutionFailed(format!(
                        "tool {}: arguments are not JSON: {}",
                        call.name, e
                    ))
                })?
            };
            tracing::debug!(tool = %call.name, "Calling tool");
            let output = tool.call(args).await?;
            results.push(Message::tool(call.id.clone().unwrap_or_default(), output));
        }
        Ok(results)
    }

    /// Replaces a leading system message or inserts one. An empty prompt leaves the
    /// conversation as is.
    fn apply_system_prompt(&self, messages: &mut Vec<Message>) {
        if !self.system_prompt.is_empty() {
            set_system_prompt(messages, self.system_prompt.clone());
        }
    }
}

#[async_trait]
impl Node<ChatState> for ChatNode {
    fn id(&self) -> &str {
        CHAT
    }

    async fn run(&self, mut state: ChatState) -> Result<ChatState, AgentError> {
        self.apply_system_prompt(&mut state.messages);
        let specs: Vec<ToolSpec> = self.tools.iter().map(|t| t.spec()).collect();
        let response = self.llm.invoke_with_tools(&state.messages, &specs).await?;
        if response.tool_calls.is_empty() {
            state.messages.push(Message::assistant(response.content));
            return Ok(state);
        }

        let tool_messages = self.call_tools(&response.tool_calls).await?;
        state.messages.push(Message::assistant_with_tool_calls(
            response.content,
            response.tool_calls,
        ));
        state.messages.extend(tool_messages);
        let answer = self
            .llm
            .invoke(&state.messages, ResponseFormat::Text)
            .await?;
        state.messages.push(Message::assistant(answer.content));
        Ok(state)
    }
}

/// Builds the chatbot graph without tools.
pub fn build_chat_graph(llm: Arc<dyn LlmClient>, config: &ChatConfig) -> StateGraph<ChatState> {
    build_chat_graph_with_tools(llm, config, Vec::new())
}

/// Builds the chatbot graph; the model may call any of `tools`.
pub fn build_chat_graph_with_tools(
    llm: Arc<dyn LlmClient>,
    config: &ChatConfig,
    tools: Vec<Arc<dyn Tool>>,
) -> StateGraph<ChatState> {
    let mut graph = StateGraph::<ChatState>::new();
    graph
        .add_node(CHAT, Arc::new(ChatNode::new(llm, config).with_tools(tools)))
        .add_edge(START, CHAT)
        .add_edge(CHAT, END);
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::memory::{MemorySaver, RunnableConfig};
    use crate::message::Role;

    /// **Scenario**: Two turns on one thread keep one system prompt and the whole history.
    #[tokio::test]
    async fn multi_turn_conversation_resumes_from_checkpoint() {
        let llm = Arc::new(MockLlm::scripted(["hello!", "you said hi"]));
        let config = ChatConfig::default()
            .with_system_prompt("Be brief.")
            .with_system_prompt_tail(" Answer in English.");
        let graph = build_chat_graph(llm.clone(), &config)
            .compile_with_checkpointer(Arc::new(MemorySaver::<ChatState>::new()))
            .unwrap();
        let cfg = RunnableConfig::for_thread("chat-1");

        let first = graph.invoke(ChatState::say("hi"), Some(cfg.clone())).await.unwrap();
        assert_eq!(first.last_reply(), Some("hello!"));

        let second = graph
            .invoke(ChatState::say("what did I say?"), Some(cfg))
            .await
            .unwrap();
        let roles: Vec<Role> = second.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            [Role::System, Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(second.messages[0].content, "Be brief. Answer in English.");
        assert_eq!(llm.requests()[1].len(), 4);
    }

    struct Upper;

    #[async_trait]
    impl Tool for Upper {
        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "upper".into(),
                description: Some("Uppercases text".into()),
                input_schema: serde_json::json!({"type": "object"}),
            }
        }

        async fn call(&self, args: serde_json::Value) -> Result<String, AgentError> {
            Ok(args["text"].as_str().unwrap_or_default().to_uppercase())
        }
    }

    fn upper_call(id: &str) -> ToolCall {
        ToolCall {
            name: "upper".into(),
            arguments: r#"{"text": "ferris"}"#.into(),
            id: Some(id.into()),
        }
    }

    /// **Scenario**: The model asks for a tool; its output is appended as a tool message and
    /// the model answers in a second call made without tools.
    #[tokio::test]
    async fn tool_call_round_then_answer() {
        let llm = Arc::new(MockLlm::new());
        llm.push_tool_calls(vec![upper_call("call_1")])
            .push("The answer is FERRIS.");
        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(Upper)];
        let graph = build_chat_graph_with_tools(llm.clone(), &ChatConfig::default(), tools)
            .compile()
            .unwrap();

        let out = graph.invoke(ChatState::say("shout ferris"), None).await.unwrap();

        let roles: Vec<Role> = out.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::User, Role::Assistant, Role::Tool, Role::Assistant]);
        assert_eq!(out.messages[1].tool_calls, vec![upper_call("call_1")]);
        assert_eq!(out.messages[2], Message::tool("call_1", "FERRIS"));
        assert_eq!(out.last_reply(), Some("The answer is FERRIS."));
        assert_eq!(
            llm.offered_tools(),
            vec![vec!["upper".to_string()], Vec::<String>::new()]
        );
        assert_eq!(llm.requests()[1].len(), 3);
    }

    /// **Scenario**: A reply without tool calls is appended directly.
    #[tokio::test]
    async fn tools_offered_but_unused() {
        let llm = Arc::new(MockLlm::scripted(["hi"]));
        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(Upper)];
        let graph = build_chat_graph_with_tools(llm.clone(), &ChatConfig::default(), tools)
            .compile()
            .unwrap();
        let out = graph.invoke(ChatState::say("hello"), None).await.unwrap();
        assert_eq!(out.messages, vec![Message::user("hello"), Message::assistant("hi")]);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn unknown_tool_fails_the_turn() {
        let llm = Arc::new(MockLlm::new());
        llm.push_tool_calls(vec![ToolCall {
            name: "missing".into(),
            arguments: "{}".into(),
            id: Some("call_9".into()),
        }]);
        let graph = build_chat_graph(llm, &ChatConfig::default()).compile().unwrap();
        let err = graph.invoke(ChatState::say("q"), None).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(m) if m.contains("unknown tool: missing")));
    }

    /// **Scenario**: A caller-supplied system message is replaced, not duplicated.
    #[test]
    fn system_prompt_replaces_existing() {
        let node = ChatNode::new(
            Arc::new(MockLlm::new()),
            &ChatConfig::default().with_system_prompt("new"),
        );
        let mut messages = vec![Message::system("old"), Message::user("q")];
        node.apply_system_prompt(&mut messages);
        assert_eq!(messages, vec![Message::system("new"), Message::user("q")]);

        let silent = ChatNode::new(Arc::new(MockLlm::new()), &ChatConfig::default());
        let mut messages = vec![Message::user("q")];
        silent.apply_system_prompt(&mut messages);
        assert_eq!(messages, vec![Message::user("q")]);
    }
}
