//! Plain retrieval chat: `START → chat → END`.
//!
//! The single step retrieves documents for the latest user message, puts them into the system
//! prompt and appends the model's answer. Nothing is graded and nothing is retried. A state
//! without messages loads `data_list` into the retriever instead.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::graph::{Node, StateGraph, END, START};
use crate::llm::{fill_template, LlmClient, ResponseFormat};
use crate::message::{last_user_content, set_system_prompt, Message, Role};
use crate::retriever::{Document, Retriever};
use crate::state::{append_messages, GraphState};

/// Node id of the chat step.
pub const CHAT: &str = "chat";

const CONTEXT_PROMPT: &str = "You are a helpful assistant, who can answer questions about the file.
<CONTEXT>
{context}
</CONTEXT>
Please answer the question based on the context, if you are not sure, you can say \"I don't know\" or \"I don't know the answer\".";

/// Vanilla RAG state. `relevant_docs` holds the documents of the current turn and is not
/// checkpointed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VanillaRagState {
    pub messages: Vec<Message>,
    pub data_list: Vec<String>,
    pub relevant_docs: Vec<Document>,
}

impl VanillaRagState {
    pub fn ask(question: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(question)],
            ..Self::default()
        }
    }

    pub fn ingest(data_list: Vec<String>) -> Self {
        Self {
            data_list,
            ..Self::default()
        }
    }

    /// Content of the last assistant message, if any.
    pub fn last_answer(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }
}

impl GraphState for VanillaRagState {
    fn merge_input(self, input: Self) -> Self {
        Self {
            messages: append_messages(self.messages, input.messages),
            data_list: input.data_list,
            relevant_docs: input.relevant_docs,
        }
    }

    fn checkpoint_state(&self) -> Self {
        Self {
            relevant_docs: Vec::new(),
            ..self.clone()
        }
    }
}

/// Vanilla RAG configuration. A custom `system_prompt` goes before the context prompt and
/// `system_prompt_tail` after it, each separated by a newline.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VanillaRagConfig {
    pub top_k: usize,
    pub system_prompt: Option<String>,
    pub system_prompt_tail: Option<String>,
}

impl Default for VanillaRagConfig {
    fn default() -> Self {
        Self {
            top_k: 2,
            system_prompt: None,
            system_prompt_tail: None,
        }
    }
}

impl VanillaRagConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_system_prompt_tail(mut self, tail: impl Into<String>) -> Self {
        self.system_prompt_tail = Some(tail.into());
        self
    }

    fn system_prompt_for(&self, docs: &[Document]) -> String {
        let context = docs
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let mut prompt = fill_template(CONTEXT_PROMPT, &[("context", context.as_str())]);
        if let Some(head) = self.system_prompt.as_deref().filter(|p| !p.is_empty()) {
            prompt = format!("{}\n{}", head, prompt);
        }
        if let Some(tail) = self.system_prompt_tail.as_deref().filter(|t| !t.is_empty()) {
            prompt = format!("{}\n{}", prompt, tail);
        }
        prompt
    }
}

/// Ingests `data_list` on an empty conversation; otherwise answers the last user message from
/// retrieved context.
pub struct VanillaChatNode {
    llm: Arc<dyn LlmClient>,
    retriever: Arc<dyn Retriever>,
    config: VanillaRagConfig,
}

impl VanillaChatNode {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        retriever: Arc<dyn Retriever>,
        config: VanillaRagConfig,
    ) -> Self {
        Self {
            llm,
            retriever,
            config,
        }
    }
}

#[async_trait]
impl Node<VanillaRagState> for VanillaChatNode {
    fn id(&self) -> &str {
        CHAT
    }

    async fn run(&self, mut state: VanillaRagState) -> Result<VanillaRagState, AgentError> {
        if state.messages.is_empty() {
            let chunks = self.retriever.insert(&state.data_list).await?;
            tracing::info!(texts = state.data_list.len(), chunks, "Ingested data");
            return Ok(state);
        }

        let query = last_user_content(&state.messages)
            .ok_or_else(|| AgentError::ExecutionFailed("no user message to answer".into()))?
            .to_string();
        state.relevant_docs = self.retriever.retrieve(&query, self.config.top_k).await?;
        tracing::debug!(docs = state.relevant_docs.len(), "Retrieved documents");

        let prompt = self.config.system_prompt_for(&state.relevant_docs);
        set_system_prompt(&mut state.messages, prompt);
        let response = self
            .llm
            .invoke(&state.messages, ResponseFormat::Text)
            .await?;
        state.messages.push(Message::assistant(response.content));
        Ok(state)
    }
}

/// Builds the vanilla RAG graph.
pub fn build_vanilla_rag_graph(
    llm: Arc<dyn LlmClient>,
    retriever: Arc<dyn Retriever>,
    config: VanillaRagConfig,
) -> StateGraph<VanillaRagState> {
    let mut graph = StateGraph::<VanillaRagState>::new();
    graph
        .add_node(CHAT, Arc::new(VanillaChatNode::new(llm, retriever, config)))
        .add_edge(START, CHAT)
        .add_edge(CHAT, END);
    graph
}
