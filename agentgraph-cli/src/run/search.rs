//! Web search run: multi-step planner over SearXNG, optionally scraping result pages.

use std::sync::Arc;

use agentgraph::planner::{build_web_search_graph, MultiStepPlanner, WebSearchState};
use agentgraph::search::{HttpScraper, Scraper, SearchEngine, SearxngSearch};
use agentgraph::LlmClient;

use crate::config::RunConfig;

use super::common::{build_llm, compile_graph};
use super::Error;

/// Answers `query` from web search results with a references section.
pub async fn run_search(config: &RunConfig, query: &str) -> Result<WebSearchState, Error> {
    let engine = Arc::new(SearxngSearch::new(config.searxng_url.clone()));
    let scraper: Option<Arc<dyn Scraper>> = config
        .scrape_urls
        .then(|| Arc::new(HttpScraper::new()) as Arc<dyn Scraper>);
    run_search_with(build_llm(config), engine, scraper, config, query).await
}

pub async fn run_search_with(
    llm: Arc<dyn LlmClient>,
    engine: Arc<dyn SearchEngine>,
    scraper: Option<Arc<dyn Scraper>>,
    config: &RunConfig,
    query: &str,
) -> Result<WebSearchState, Error> {
    let mut planner = MultiStepPlanner::new(llm, engine, config.planner_config());
    if let Some(scraper) = scraper {
        planner = planner.with_scraper(scraper);
    }
    let graph = compile_graph(build_web_search_graph(Arc::new(planner)), config)?;
    let state = graph
        .invoke(WebSearchState::ask(query), Some(config.runnable_config()))
        .await?;
    Ok(state)
}
