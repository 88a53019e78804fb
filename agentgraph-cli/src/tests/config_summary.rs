//! Unit tests for [`config_summary`](crate::run::config_summary).

use crate::run::{config_summary, Agent};

use super::test_config;

/// **Scenario**: The summary names the agent, model and memory, and never prints the API key.
#[test]
fn summary_lists_sections_without_api_key() {
    let mut config = test_config().with_thread_id("t1");
    config.temperature = Some(0.5);
    let summary = config_summary(&config, Agent::Rag);

    assert!(summary.starts_with("config: agent=rag\n"));
    assert!(summary.contains("model=test-model"));
    assert!(summary.contains("temperature=0.5"));
    assert!(summary.contains("thread_id=t1"));
    assert!(summary.contains("rag: top_k=3 check_hallucination=false vanilla=false"));
    assert!(!summary.contains("search:"));
    assert!(!summary.contains("test-key"));
}

#[test]
fn chat_summary_reports_web_search() {
    let mut config = test_config();
    config.chat_web_search = true;
    let summary = config_summary(&config, Agent::Chat);
    assert!(summary.contains("chat: system_prompt=none web_search=true"));
}

#[test]
fn summary_without_thread_has_no_memory() {
    let summary = config_summary(&test_config(), Agent::Search);
    assert!(summary.contains("memory: none"));
    assert!(summary.contains("temperature=default"));
    assert!(summary.contains("searxng_url=http://localhost:8080"));
}
