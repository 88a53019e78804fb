//! State threaded through the self-RAG graph.

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::retriever::Document;
use crate::state::{append_messages, override_non_empty, GraphState};

/// Self-RAG workflow state.
///
/// `messages` is the conversation and survives across turns. `data_list` holds texts to ingest
/// when the graph runs without a question. `relevant_docs`, `user_query` and `answer` are
/// working fields for one question; `relevant_docs` never reaches the checkpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfRagState {
    pub messages: Vec<Message>,
    pub data_list: Vec<String>,
    pub relevant_docs: Vec<Document>,
    pub user_query: String,
    pub answer: String,
}

impl SelfRagState {
    /// State for asking one question.
    pub fn ask(question: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(question)],
            ..Self::default()
        }
    }

    /// State for ingesting texts (no messages, so the graph routes to `ingest_data`).
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
            .find(|m| m.role == crate::message::Role::Assistant)
            .map(|m| m.content.as_str())
    }
}

impl GraphState for SelfRagState {
    /// Appends new messages to the conversation; per-question fields come from the caller.
    fn merge_input(self, input: Self) -> Self {
        Self {
            messages: append_messages(self.messages, input.messages),
            data_list: input.data_list,
            relevant_docs: input.relevant_docs,
            user_query: override_non_empty(self.user_query, input.user_query),
            answer: override_non_empty(self.answer, input.answer),
        }
    }

    fn checkpoint_state(&self) -> Self {
        Self {
            relevant_docs: Vec::new(),
            ..self.clone()
        }
    }
}
