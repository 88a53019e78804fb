//! Routers of the self-RAG graph and their closed outcome sets.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::grader::BinaryGrader;
use crate::graph::{Route, Router};

use super::state::SelfRagState;

/// Entry decision: answer a question or ingest data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HasUserQuery {
    Yes,
    No,
}

impl Route for HasUserQuery {
    fn variants() -> &'static [Self] {
        &[Self::Yes, Self::No]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
        }
    }
}

/// `Yes` when the conversation has at least one message.
pub fn has_user_query(state: &SelfRagState) -> HasUserQuery {
    if state.messages.is_empty() {
        HasUserQuery::No
    } else {
        HasUserQuery::Yes
    }
}

/// After grading documents: generate, or rewrite the query and retrieve again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecideToGenerate {
    Yes,
    No,
}

impl Route for DecideToGenerate {
    fn variants() -> &'static [Self] {
        &[Self::Yes, Self::No]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
        }
    }
}

/// `No` when grading left no relevant documents.
pub fn decide_to_generate(state: &SelfRagState) -> DecideToGenerate {
    if state.relevant_docs.is_empty() {
        DecideToGenerate::No
    } else {
        DecideToGenerate::Yes
    }
}

/// Verdict on a generated answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GradeGeneration {
    /// Grounded and answers the question: accept.
    Correct,
    /// Grounded but does not answer the question: rewrite the query.
    Incorrect,
    /// Not grounded in the documents: regenerate.
    Hallucination,
}

impl Route for GradeGeneration {
    fn variants() -> &'static [Self] {
        &[Self::Correct, Self::Incorrect, Self::Hallucination]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Correct => "Answer is correct",
            Self::Incorrect => "Answer is incorrect",
            Self::Hallucination => "Hallucination",
        }
    }
}

/// Grades the answer against the documents (when enabled) and the question.
pub struct GradeGenerationRouter {
    grader: BinaryGrader,
    check_hallucination: bool,
}

impl GradeGenerationRouter {
    pub fn new(grader: BinaryGrader, check_hallucination: bool) -> Self {
        Self {
            grader,
            check_hallucination,
        }
    }
}

#[async_trait]
impl Router<SelfRagState, GradeGeneration> for GradeGenerationRouter {
    async fn route(&self, state: &SelfRagState) -> Result<GradeGeneration, AgentError> {
        if self.check_hallucination {
            let facts = state
                .relevant_docs
                .iter()
                .map(|d| d.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            if !self.grader.grade_hallucination(&facts, &state.answer).await? {
                tracing::warn!(answer = %state.answer, "Hallucination");
                return Ok(GradeGeneration::Hallucination);
            }
        }
        if self
            .grader
            .grade_answer(&state.user_query, &state.answer)
            .await?
        {
            tracing::debug!("Answer is correct");
            Ok(GradeGeneration::Correct)
        } else {
            tracing::warn!(answer = %state.answer, "Answer is incorrect");
            Ok(GradeGeneration::Incorrect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::llm::MockLlm;
    use crate::message::Message;
    use crate::retriever::Document;

    fn answered_state() -> SelfRagState {
        SelfRagState {
            relevant_docs: vec![Document::new("Paris is the capital of France")],
            user_query: "capital of France?".into(),
            answer: "Paris".into(),
            ..SelfRagState::default()
        }
    }

    #[test]
    fn pure_routers() {
        assert_eq!(has_user_query(&SelfRagState::default()), HasUserQuery::No);
        assert_eq!(has_user_query(&SelfRagState::ask("q")), HasUserQuery::Yes);
        let mut state = SelfRagState::default();
        assert_eq!(decide_to_generate(&state), DecideToGenerate::No);
        state.relevant_docs.push(Document::new("d"));
        assert_eq!(decide_to_generate(&state), DecideToGenerate::Yes);
        state.messages.push(Message::user("q"));
        assert_eq!(has_user_query(&state), HasUserQuery::Yes);
    }

    /// **Scenario**: With the hallucination check off, only the answer grader is consulted.
    #[tokio::test]
    async fn grade_generation_skips_grounding_by_default() {
        let llm = Arc::new(MockLlm::scripted([r#"{"binary_score": "yes"}"#]));
        let router = GradeGenerationRouter::new(BinaryGrader::new(llm.clone()), false);
        let route = router.route(&answered_state()).await.unwrap();
        assert_eq!(route, GradeGeneration::Correct);
        assert_eq!(llm.call_count(), 1);
        assert!(llm.requests()[0][1].content.contains("QUESTION"));
    }

    /// **Scenario**: With the check on, an ungrounded answer routes to Hallucination.
    #[tokio::test]
    async fn grade_generation_detects_hallucination() {
        let llm = Arc::new(MockLlm::scripted([r#"{"binary_score": "no"}"#]));
        let router = GradeGenerationRouter::new(BinaryGrader::new(llm.clone()), true);
        let route = router.route(&answered_state()).await.unwrap();
        assert_eq!(route, GradeGeneration::Hallucination);
        assert!(llm.requests()[0][1].content.contains("FACTS"));
    }

    /// **Scenario**: A grounded answer that misses the question routes to Incorrect.
    #[tokio::test]
    async fn grade_generation_incorrect_answer() {
        let llm = Arc::new(MockLlm::scripted([
            r#"{"binary_score": "yes"}"#,
            r#"{"binary_score": "no"}"#,
        ]));
        let router = GradeGenerationRouter::new(BinaryGrader::new(llm.clone()), true);
        let route = router.route(&answered_state()).await.unwrap();
        assert_eq!(route, GradeGeneration::Incorrect);
        assert_eq!(llm.call_count(), 2);
    }
}
