//! Chat agent run: one user turn, resumed from the thread's conversation when set.

use std::sync::Arc;

use agentgraph::chatbot::{build_chat_graph_with_tools, ChatState};
use agentgraph::search::SearxngSearch;
use agentgraph::tools::WebSearchTool;
use agentgraph::{LlmClient, Tool};

use crate::config::RunConfig;

use super::common::{build_llm, compile_graph};
use super::Error;

/// Sends `message` to the chat agent and returns the conversation after the reply.
pub async fn run_chat(config: &RunConfig, message: &str) -> Result<ChatState, Error> {
    let mut tools: Vec<Arc<dyn Tool>> = Vec::new();
    if config.chat_web_search {
        let engine = Arc::new(SearxngSearch::new(config.searxng_url.clone()));
        tools.push(Arc::new(WebSearchTool::new(engine)));
    }
    run_chat_with(build_llm(config), tools, config, message).await
}

/// Runs one turn; the model may call any of `tools`.
pub async fn run_chat_with(
    llm: Arc<dyn LlmClient>,
    tools: Vec<Arc<dyn Tool>>,
    config: &RunConfig,
    message: &str,
) -> Result<ChatState, Error> {
    let graph = compile_graph(
        build_chat_graph_with_tools(llm, &config.chat_config(), tools),
        config,
    )?;
    let state = graph
        .invoke(ChatState::say(message), Some(config.runnable_config()))
        .await?;
    Ok(state)
}
