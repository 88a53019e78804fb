//! Planner configuration.

use serde::Deserialize;

/// Multi-step planner options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Results kept per search query.
    pub search_result_limit: usize,
    /// Fetch each result page and summarize it against the user query.
    pub scrape_urls: bool,
    /// Summarize each step's evidence before the final answer.
    pub concise_step_results: bool,
    /// Steps kept from the generated plan.
    pub max_steps: usize,
    /// Queries kept per step.
    pub max_queries_per_step: usize,
    pub locale: String,
    pub categories: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            search_result_limit: 3,
            scrape_urls: false,
            concise_step_results: false,
            max_steps: 4,
            max_queries_per_step: 5,
            locale: "zh-TW".to_string(),
            categories: "general".to_string(),
        }
    }
}

impl PlannerConfig {
    pub fn with_search_result_limit(mut self, limit: usize) -> Self {
        self.search_result_limit = limit;
        self
    }

    pub fn with_scrape_urls(mut self, enabled: bool) -> Self {
        self.scrape_urls = enabled;
        self
    }

    pub fn with_concise_step_results(mut self, enabled: bool) -> Self {
        self.concise_step_results = enabled;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}
