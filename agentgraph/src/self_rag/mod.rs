//! Self-correcting retrieval-augmented QA graph.
//!
//! ```text
//! START ─has_user_query─┬─YES─▶ get_user_query ─▶ retrieve ─▶ grade_documents
//!                       └─NO──▶ ingest_data ─▶ END           │
//!                                    ┌──────decide_to_generate┘
//!                  ┌──NO── transform_query ◀─┐        │YES
//!                  ▼                         │        ▼
//!               retrieve            incorrect├── generate_answer ◀─┐
//!                                            │        │            │hallucination
//!                                            └─grade_generation────┘
//!                                                     │correct
//!                                                     ▼
//!                                             append_answer ─▶ END
//! ```
//!
//! Both loops (rewrite-and-retrieve, regenerate) are bounded by the engine's recursion limit.
//! Graders retry malformed responses internally and degrade to "no".

mod append_answer;
mod config;
mod generate_answer;
mod get_user_query;
mod grade_documents;
mod ingest_data;
mod prompts;
mod retrieve;
mod routes;
mod state;
mod transform_query;
mod translate;

use std::sync::Arc;

pub use append_answer::AppendAnswerNode;
pub use config::{SelfRagConfig, TranslationConfig};
pub use generate_answer::GenerateAnswerNode;
pub use get_user_query::GetUserQueryNode;
pub use grade_documents::GradeDocumentsNode;
pub use ingest_data::IngestDataNode;
pub use prompts::NO_ANSWER;
pub use retrieve::RetrieveNode;
pub use routes::{
    decide_to_generate, has_user_query, DecideToGenerate, GradeGeneration, GradeGenerationRouter,
    HasUserQuery,
};
pub use state::SelfRagState;
pub use transform_query::TransformQueryNode;

use crate::grader::BinaryGrader;
use crate::graph::{route_fn, Router, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::retriever::Retriever;

pub const GET_USER_QUERY: &str = "get_user_query";
pub const INGEST_DATA: &str = "ingest_data";
pub const RETRIEVE: &str = "retrieve";
pub const GRADE_DOCUMENTS: &str = "grade_documents";
pub const TRANSFORM_QUERY: &str = "transform_query";
pub const GENERATE_ANSWER: &str = "generate_answer";
pub const APPEND_ANSWER: &str = "append_answer";

/// Builds the self-RAG graph; compile it with or without a checkpointer.
///
/// `llm` serves generation, rewriting, translation and (in JSON mode) grading.
pub fn build_self_rag_graph(
    llm: Arc<dyn LlmClient>,
    retriever: Arc<dyn Retriever>,
    config: SelfRagConfig,
) -> StateGraph<SelfRagState> {
    let grader = BinaryGrader::new(llm.clone()).with_retries(config.grader_retries);
    let grade_generation: Arc<dyn Router<SelfRagState, GradeGeneration>> = Arc::new(
        GradeGenerationRouter::new(grader.clone(), config.check_hallucination),
    );

    let mut graph = StateGraph::<SelfRagState>::new();
    graph
        .add_node(
            GET_USER_QUERY,
            Arc::new(GetUserQueryNode::new(
                llm.clone(),
                config.input_translation.clone(),
            )),
        )
        .add_node(INGEST_DATA, Arc::new(IngestDataNode::new(retriever.clone())))
        .add_node(
            RETRIEVE,
            Arc::new(RetrieveNode::new(retriever, config.top_k)),
        )
        .add_node(
            GRADE_DOCUMENTS,
            Arc::new(GradeDocumentsNode::new(grader)),
        )
        .add_node(TRANSFORM_QUERY, Arc::new(TransformQueryNode::new(llm.clone())))
        .add_node(GENERATE_ANSWER, Arc::new(GenerateAnswerNode::new(llm.clone())))
        .add_node(
            APPEND_ANSWER,
            Arc::new(AppendAnswerNode::new(llm, config.output_translation.clone())),
        );

    graph
        .add_conditional_edges(
            START,
            route_fn(has_user_query),
            [
                (HasUserQuery::Yes, GET_USER_QUERY),
                (HasUserQuery::No, INGEST_DATA),
            ],
        )
        .add_edge(INGEST_DATA, END)
        .add_edge(GET_USER_QUERY, RETRIEVE)
        .add_edge(RETRIEVE, GRADE_DOCUMENTS)
        .add_conditional_edges(
            GRADE_DOCUMENTS,
            route_fn(decide_to_generate),
            [
                (DecideToGenerate::Yes, GENERATE_ANSWER),
                (DecideToGenerate::No, TRANSFORM_QUERY),
            ],
        )
        .add_edge(TRANSFORM_QUERY, RETRIEVE)
        .add_conditional_edges(
            GENERATE_ANSWER,
            grade_generation,
            [
                (GradeGeneration::Correct, APPEND_ANSWER),
                (GradeGeneration::Incorrect, TRANSFORM_QUERY),
                (GradeGeneration::Hallucination, GENERATE_ANSWER),
            ],
        )
        .add_edge(APPEND_ANSWER, END);
    graph
}
