//! grade_documents node: keeps only documents the grader marks relevant.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::grader::BinaryGrader;
use crate::graph::Node;

use super::state::SelfRagState;
use super::GRADE_DOCUMENTS;

pub struct GradeDocumentsNode {
    grader: BinaryGrader,
}

impl GradeDocumentsNode {
    pub fn new(grader: BinaryGrader) -> Self {
        Self { grader }
    }
}

#[async_trait]
impl Node<SelfRagState> for GradeDocumentsNode {
    fn id(&self) -> &str {
        GRADE_DOCUMENTS
    }

    async fn run(&self, mut state: SelfRagState) -> Result<SelfRagState, AgentError> {
        let retrieved = std::mem::take(&mut state.relevant_docs);
        let total = retrieved.len();
        for doc in retrieved {
            if self
                .grader
                .grade_document(&doc.content, &state.user_query)
                .await?
            {
                state.relevant_docs.push(doc);
            }
        }
        tracing::debug!(
            removed = total - state.relevant_docs.len(),
            kept = state.relevant_docs.len(),
            "Filtered irrelevant documents"
        );
        Ok(state)
    }
}
