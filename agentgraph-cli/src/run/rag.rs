//! RAG run: ingest text files into an in-memory retriever, then answer a question with the
//! self-correcting graph or, with `rag_vanilla`, the single-step one.

use std::path::PathBuf;
use std::sync::Arc;

use agentgraph::retriever::{HashingEmbedder, InMemoryRetriever};
use agentgraph::self_rag::{build_self_rag_graph, SelfRagState};
use agentgraph::vanilla_rag::{build_vanilla_rag_graph, VanillaRagState};
use agentgraph::{LlmClient, RunnableConfig};

use crate::config::RunConfig;

use super::common::{build_llm, compile_graph};
use super::Error;

/// What a RAG run did.
#[derive(Debug)]
pub struct RagOutcome {
    /// Chunks in the retriever after ingestion.
    pub chunks: usize,
    /// Final answer, when a question was asked.
    pub answer: Option<String>,
}

/// Reads `files`, ingests them and answers `question` (if any).
pub async fn run_rag(
    config: &RunConfig,
    files: &[PathBuf],
    question: Option<&str>,
) -> Result<RagOutcome, Error> {
    let mut texts = Vec::with_capacity(files.len());
    for path in files {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        texts.push(text);
    }
    let retriever = Arc::new(InMemoryRetriever::new(Arc::new(HashingEmbedder::default())));
    run_rag_with(build_llm(config), retriever, config, texts, question).await
}

/// Runs the ingest branch for `texts`, then the question branch for `question`.
///
/// Ingestion never touches the thread checkpoint; only the question run is resumed and saved.
pub async fn run_rag_with(
    llm: Arc<dyn LlmClient>,
    retriever: Arc<InMemoryRetriever>,
    config: &RunConfig,
    texts: Vec<String>,
    question: Option<&str>,
) -> Result<RagOutcome, Error> {
    let ingest_config = RunnableConfig::default().with_recursion_limit(config.recursion_limit);
    let answer = if config.rag_vanilla {
        let graph = compile_graph(
            build_vanilla_rag_graph(llm, retriever.clone(), config.vanilla_rag_config()),
            config,
        )?;
        if !texts.is_empty() {
            graph
                .invoke(VanillaRagState::ingest(texts), Some(ingest_config))
                .await?;
            tracing::info!(chunks = retriever.len(), "Ingested documents");
        }
        match question {
            Some(question) => {
                ensure_documents(&retriever)?;
                let state = graph
                    .invoke(VanillaRagState::ask(question), Some(config.runnable_config()))
                    .await?;
                state.last_answer().map(str::to_string)
            }
            None => None,
        }
    } else {
        let graph = compile_graph(
            build_self_rag_graph(llm, retriever.clone(), config.self_rag_config()),
            config,
        )?;
        if !texts.is_empty() {
            graph
                .invoke(SelfRagState::ingest(texts), Some(ingest_config))
                .await?;
            tracing::info!(chunks = retriever.len(), "Ingested documents");
        }
        match question {
            Some(question) => {
                ensure_documents(&retriever)?;
                let state = graph
                    .invoke(SelfRagState::ask(question), Some(config.runnable_config()))
                    .await?;
                state.last_answer().map(str::to_string)
            }
            None => None,
        }
    };

    Ok(RagOutcome {
        chunks: retriever.len(),
        answer,
    })
}

fn ensure_documents(retriever: &InMemoryRetriever) -> Result<(), Error> {
    if retriever.is_empty() {
        return Err("no documents to search; pass --ingest <FILE>".into());
    }
    Ok(())
}
