//! Human-readable config summary printed to stderr with `--verbose`. Never includes the key.

use crate::config::RunConfig;

use super::Agent;

/// One header line plus indented `key=value` sections relevant to `agent`.
pub fn config_summary(config: &RunConfig, agent: Agent) -> String {
    let temperature = config
        .temperature
        .map(|t| t.to_string())
        .unwrap_or_else(|| "default".to_string());
    let mut lines = vec![
        format!("config: agent={}", agent.as_str()),
        format!(
            "  llm: model={} api_base={} temperature={}",
            config.model, config.api_base, temperature
        ),
    ];
    lines.push(match &config.thread_id {
        Some(tid) => format!(
            "  memory: thread_id={} checkpointer={} db_path={}",
            tid,
            checkpointer_kind(),
            config.db_path
        ),
        None => "  memory: none".to_string(),
    });
    lines.push(format!("  limits: recursion_limit={}", config.recursion_limit));
    match agent {
        Agent::Chat => lines.push(format!(
            "  chat: system_prompt={} web_search={}",
            if config.system_prompt.is_some() { "custom" } else { "none" },
            config.chat_web_search
        )),
        Agent::Rag => lines.push(format!(
            "  rag: top_k={} check_hallucination={} vanilla={}",
            config.rag_top_k, config.check_hallucination, config.rag_vanilla
        )),
        Agent::Search => lines.push(format!(
            "  search: searxng_url={} result_limit={} scrape_urls={} concise_step_results={}",
            config.searxng_url,
            config.search_result_limit,
            config.scrape_urls,
            config.concise_step_results
        )),
    }
    lines.join("\n")
}

fn checkpointer_kind() -> &'static str {
    if cfg!(feature = "sqlite") {
        "sqlite"
    } else {
        "memory"
    }
}
