//! Shared run wiring: LLM client, checkpointer and graph compilation.

use std::sync::Arc;

use agentgraph::{Checkpointer, ChatOpenAI, CompiledStateGraph, GraphState, LlmClient, StateGraph};
use async_openai::config::OpenAIConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::RunConfig;
use crate::middleware::WithNodeLogging;

use super::Error;

/// OpenAI-compatible chat client from `config`.
pub(crate) fn build_llm(config: &RunConfig) -> Arc<dyn LlmClient> {
    let openai_config = OpenAIConfig::new()
        .with_api_base(&config.api_base)
        .with_api_key(config.api_key.clone());
    let mut llm = ChatOpenAI::with_config(openai_config, config.model.clone());
    if let Some(t) = config.temperature {
        llm = llm.with_temperature(t);
    }
    Arc::new(llm)
}

/// Checkpointer for `config.thread_id`, or `None` when the run has no thread.
pub(crate) fn build_checkpointer<S>(
    config: &RunConfig,
) -> Result<Option<Arc<dyn Checkpointer<S>>>, Error>
where
    S: GraphState + Serialize + DeserializeOwned,
{
    if config.thread_id.is_none() {
        return Ok(None);
    }
    #[cfg(feature = "sqlite")]
    {
        let saver: Arc<dyn Checkpointer<S>> = Arc::new(agentgraph::SqliteSaver::new(
            &config.db_path,
            Arc::new(agentgraph::JsonSerializer),
        )?);
        Ok(Some(saver))
    }
    #[cfg(not(feature = "sqlite"))]
    {
        tracing::warn!("built without sqlite; thread state lives only as long as this process");
        let saver: Arc<dyn Checkpointer<S>> = Arc::new(agentgraph::MemorySaver::<S>::new());
        Ok(Some(saver))
    }
}

/// Attaches node logging and compiles, with a checkpointer when the run has a thread.
pub(crate) fn compile_graph<S>(
    graph: StateGraph<S>,
    config: &RunConfig,
) -> Result<CompiledStateGraph<S>, Error>
where
    S: GraphState + Serialize + DeserializeOwned,
{
    let graph = graph
        .with_node_logging()
        .with_recursion_limit(config.recursion_limit);
    let compiled = match build_checkpointer(config)? {
        Some(cp) => graph.compile_with_checkpointer(cp)?,
        None => graph.compile()?,
    };
    Ok(compiled)
}
