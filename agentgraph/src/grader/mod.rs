//! Binary graders: yes/no quality gates answered by the model in JSON.
//!
//! Every grader call sends a system prompt and a user message with
//! `ResponseFormat::Json`, reads `binary_score` and compares it case-insensitively to `"yes"`.
//! A malformed response is retried up to `retries` times; when retries run out the verdict is
//! `false` so the calling workflow keeps moving. LLM call failures are not retried and
//! propagate unchanged.

mod prompts;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::error::AgentError;
use crate::llm::{extract_json_object, fill_template, LlmClient, ResponseFormat};
use crate::message::Message;

/// Attempts per grader call before giving up with a negative verdict.
pub const DEFAULT_GRADER_RETRIES: usize = 3;

/// Why a grader response could not be read. Never leaves this module.
#[derive(Debug, Error, PartialEq)]
enum GraderParseError {
    #[error("response is not a JSON object: {0}")]
    NotJson(String),
    #[error("response has no binary_score field")]
    MissingScore,
    #[error("binary_score is neither a string nor a boolean: {0}")]
    InvalidScore(Value),
}

fn parse_binary_score(content: &str) -> Result<bool, GraderParseError> {
    let value =
        extract_json_object(content).ok_or_else(|| GraderParseError::NotJson(content.to_string()))?;
    match value.get("binary_score") {
        None | Some(Value::Null) => Err(GraderParseError::MissingScore),
        Some(Value::String(s)) => Ok(s.trim().eq_ignore_ascii_case("yes")),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(GraderParseError::InvalidScore(other.clone())),
    }
}

/// Yes/no grader over a JSON-mode LLM.
///
/// **Interaction**: Used by the self-RAG `grade_documents` node and `grade_generation` router.
#[derive(Clone)]
pub struct BinaryGrader {
    llm: Arc<dyn LlmClient>,
    retries: usize,
}

impl BinaryGrader {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            retries: DEFAULT_GRADER_RETRIES,
        }
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn retries(&self) -> usize {
        self.retries
    }

    /// Asks the model one yes/no question.
    ///
    /// Returns `false` after `retries` malformed responses. Errors only when both prompts are
    /// missing or the LLM call itself fails.
    pub async fn grade(
        &self,
        system_prompt: Option<&str>,
        user_message: Option<&str>,
    ) -> Result<bool, AgentError> {
        let messages: Vec<Message> = system_prompt
            .map(Message::system)
            .into_iter()
            .chain(user_message.map(Message::user))
            .collect();
        if messages.is_empty() {
            return Err(AgentError::ExecutionFailed(
                "binary grader: no messages to send".into(),
            ));
        }

        for attempt in 1..=self.retries {
            let response = self.llm.invoke(&messages, ResponseFormat::Json).await?;
            match parse_binary_score(&response.content) {
                Ok(verdict) => {
                    tracing::debug!(attempt, verdict, "Binary grader verdict");
                    return Ok(verdict);
                }
                Err(error) => {
                    tracing::warn!(attempt, retries = self.retries, %error, "Binary grader: no result, retrying");
                }
            }
        }
        tracing::warn!(retries = self.retries, "Binary grader: retries exhausted, grading no");
        Ok(false)
    }

    /// Is `document` at least partly relevant to `question`?
    pub async fn grade_document(&self, document: &str, question: &str) -> Result<bool, AgentError> {
        let user = fill_template(
            prompts::DOC_GRADER_PROMPT,
            &[("document", document), ("question", question)],
        );
        self.grade(Some(prompts::DOC_GRADER_INSTRUCTIONS), Some(&user))
            .await
    }

    /// Is `generation` grounded in `documents`?
    pub async fn grade_hallucination(
        &self,
        documents: &str,
        generation: &str,
    ) -> Result<bool, AgentError> {
        let user = fill_template(
            prompts::HALLUCINATION_GRADER_PROMPT,
            &[("documents", documents), ("generation", generation)],
        );
        self.grade(Some(prompts::HALLUCINATION_GRADER_INSTRUCTIONS), Some(&user))
            .await
    }

    /// Does `generation` answer `question`?
    pub async fn grade_answer(&self, question: &str, generation: &str) -> Result<bool, AgentError> {
        let user = fill_template(
            prompts::ANSWER_GRADER_PROMPT,
            &[("question", question), ("generation", generation)],
        );
        self.grade(Some(prompts::ANSWER_GRADER_INSTRUCTIONS), Some(&user))
            .await
    }
}
