//! Unit tests for agentgraph-cli, organized by module.
//!
//! Tests are BDD-style with descriptive names; each submodule documents the behaviour under test.

mod cli;
mod config_summary;

use crate::config::RunConfig;

/// Config as `from_env` would build it with only `OPENAI_API_KEY` set.
pub(crate) fn test_config() -> RunConfig {
    RunConfig {
        api_base: "http://localhost:11434/v1".to_string(),
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        temperature: None,
        thread_id: None,
        db_path: "checkpoints.db".to_string(),
        recursion_limit: agentgraph::DEFAULT_RECURSION_LIMIT,
        system_prompt: None,
        chat_web_search: false,
        rag_vanilla: false,
        rag_top_k: 3,
        check_hallucination: false,
        searxng_url: "http://localhost:8080".to_string(),
        search_result_limit: 3,
        scrape_urls: false,
        concise_step_results: false,
        verbose: false,
    }
}
