//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Uses the real OpenAI Chat Completions API, or any compatible endpoint via
//! `ChatOpenAI::with_config`. Requires `OPENAI_API_KEY` (or explicit config). Tools passed to
//! `invoke_with_tools` are sent as function tools; the reply may then carry `tool_calls`.
//!
//! **Interaction**: Implements `LlmClient`; used by the self-RAG, planner and chat nodes like
//! `MockLlm`. Depends on `async_openai` (feature `openai`).

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, ResponseFormat};
use crate::message::{Message, Role, ToolCall};
use crate::tools::ToolSpec;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCall, ChatCompletionMessageToolCalls,
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestToolMessage,
        ChatCompletionRequestUserMessage, ChatCompletionTool, ChatCompletionTools,
        CreateChatCompletionRequestArgs, FunctionCall, FunctionObject,
    },
    Client,
};

/// System instruction prepended when the caller asks for `ResponseFormat::Json`.
const JSON_ONLY_INSTRUCTION: &str =
    "Respond with a single valid JSON object only. Do not wrap it in markdown or add prose.";

/// OpenAI Chat Completions client implementing `LlmClient` (aligns with LangChain ChatOpenAI).
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide
/// config via `ChatOpenAI::with_config`.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Convert our `Message` list to OpenAI request messages, including assistant tool calls
    /// and tool results.
    fn messages_to_request(
        messages: &[Message],
        format: ResponseFormat,
    ) -> Result<Vec<ChatCompletionRequestMessage>, AgentError> {
        let mut out = Vec::with_capacity(messages.len() + 1);
        if format == ResponseFormat::Json {
            out.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage::from(JSON_ONLY_INSTRUCTION),
            ));
        }
        for m in messages {
            out.push(match m.role {
                Role::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(m.content.as_str()),
                ),
                Role::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(m.content.as_str()),
                ),
                Role::Assistant if m.tool_calls.is_empty() => {
                    ChatCompletionRequestMessage::Assistant(m.content.as_str().into())
                }
                Role::Assistant => {
                    let mut assistant = ChatCompletionRequestAssistantMessageArgs::default();
                    if !m.content.is_empty() {
                        assistant.content(m.content.as_str());
                    }
                    let calls: Vec<_> = m.tool_calls.iter().map(to_openai_call).collect();
                    assistant.tool_calls(calls);
                    let built = assistant.build().map_err(|e| {
                        AgentError::ExecutionFailed(format!("OpenAI message build failed: {}", e))
                    })?;
                    ChatCompletionRequestMessage::Assistant(built)
                }
                Role::Tool => {
                    ChatCompletionRequestMessage::Tool(ChatCompletionRequestToolMessage {
                        content: m.content.as_str().into(),
                        tool_call_id: m.tool_call_id.clone().unwrap_or_default(),
                    })
                }
            });
        }
        Ok(out)
    }

    async fn complete(
        &self,
        messages: &[Message],
        format: ResponseFormat,
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError> {
        let openai_messages = Self::messages_to_request(messages, format)?;
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(openai_messages);

        if !tools.is_empty() {
            let chat_tools: Vec<ChatCompletionTools> = tools
                .iter()
                .map(|t| {
                    ChatCompletionTools::Function(ChatCompletionTool {
                        function: FunctionObject {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: Some(t.input_schema.clone()),
                            ..Default::default()
                        },
                    })
                })
                .collect();
            args.tools(chat_tools);
        }

        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            tools = tools.len(),
            ?format,
            "OpenAI request"
        );

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;

        let choice =
            response.choices.into_iter().next().ok_or_else(|| {
                AgentError::ExecutionFailed("OpenAI returned no choices".to_string())
            })?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| {
                if let ChatCompletionMessageToolCalls::Function(f) = tc {
                    Some(ToolCall {
                        name: f.function.name,
                        arguments: f.function.arguments,
                        id: Some(f.id),
                    })
                } else {
                    None
                }
            })
            .collect();

        Ok(LlmResponse {
            content,
            tool_calls,
        })
    }
}

fn to_openai_call(call: &ToolCall) -> ChatCompletionMessageToolCalls {
    ChatCompletionMessageToolCalls::Function(ChatCompletionMessageToolCall {
        id: call.id.clone().unwrap_or_default(),
        function: FunctionCall {
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        },
    })
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(
        &self,
        messages: &[Message],
        format: ResponseFormat,
    ) -> Result<LlmResponse, AgentError> {
        self.complete(messages, format, &[]).await
    }

    async fn invoke_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError> {
        self.complete(messages, ResponseFormat::Text, tools).await
    }
}

#[cfg(all(test, feature = "openai"))]
mod tests {
    use super::*;

    /// **Scenario**: ChatOpenAI::with_config uses custom config and model.
    #[test]
    fn chat_openai_with_config_creates_client() {
        let config = OpenAIConfig::new().with_api_key("test-key");
        let llm = ChatOpenAI::with_config(config, "gpt-4o-mini").with_temperature(0.0);
        assert_eq!(llm.model(), "gpt-4o-mini");
    }

    /// **Scenario**: JSON format prepends one system instruction; text format does not.
    #[test]
    fn json_format_prepends_instruction() {
        let msgs = [Message::system("grade"), Message::user("doc")];
        assert_eq!(
            ChatOpenAI::messages_to_request(&msgs, ResponseFormat::Text)
                .unwrap()
                .len(),
            2
        );
        let json = ChatOpenAI::messages_to_request(&msgs, ResponseFormat::Json).unwrap();
        assert_eq!(json.len(), 3);
        assert!(matches!(json[0], ChatCompletionRequestMessage::System(_)));
    }

    /// **Scenario**: A tool round maps to an assistant message with tool_calls and a tool
    /// message carrying the call id.
    #[test]
    fn tool_round_maps_to_openai_messages() {
        let call = ToolCall {
            name: "web_search".into(),
            arguments: r#"{"query":"rust"}"#.into(),
            id: Some("call_1".into()),
        };
        let msgs = [
            Message::user("search rust"),
            Message::assistant_with_tool_calls("", vec![call]),
            Message::tool("call_1", "results"),
        ];
        let out = ChatOpenAI::messages_to_request(&msgs, ResponseFormat::Text).unwrap();
        match &out[1] {
            ChatCompletionRequestMessage::Assistant(a) => {
                let calls = a.tool_calls.as_ref().expect("tool calls sent");
                assert!(matches!(
                    &calls[0],
                    ChatCompletionMessageToolCalls::Function(f)
                        if f.id == "call_1" && f.function.name == "web_search"
                ));
                assert!(a.content.is_none());
            }
            other => panic!("expected assistant message, got {:?}", other),
        }
        match &out[2] {
            ChatCompletionRequestMessage::Tool(t) => assert_eq!(t.tool_call_id, "call_1"),
            other => panic!("expected tool message, got {:?}", other),
        }
    }
}
