//! Web search collaborators used by the multi-step planner.
//!
//! [`SearchEngine`] returns result snippets for one query; [`Scraper`] fetches a result page
//! for richer content. Both are traits so the planner can run against stubs in tests.

mod scraper;
mod searxng;

pub use scraper::{HttpScraper, ScrapedPage, Scraper};
pub use searxng::SearxngSearch;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Recency bucket for a search query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl TimeRange {
    /// Case-insensitive parse; anything unknown becomes `Month`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "day" => Self::Day,
            "week" => Self::Week,
            "year" => Self::Year,
            _ => Self::Month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Per-query search options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub time_range: TimeRange,
    /// Maximum results returned.
    pub limit: usize,
    pub locale: String,
    pub categories: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            time_range: TimeRange::Month,
            limit: 3,
            locale: "zh-TW".to_string(),
            categories: "general".to_string(),
        }
    }
}

/// One search hit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Query that produced this hit.
    pub search_query: String,
    pub url: String,
    pub title: String,
    /// Snippet returned by the engine.
    pub content: String,
}

/// Search-engine capability.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Returns at most `params.limit` results for `query`.
    async fn search(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<Vec<SearchResult>, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_parse_lenient() {
        assert_eq!(TimeRange::parse_lenient("DAY"), TimeRange::Day);
        assert_eq!(TimeRange::parse_lenient(" week "), TimeRange::Week);
        assert_eq!(TimeRange::parse_lenient("year"), TimeRange::Year);
        assert_eq!(TimeRange::parse_lenient("decade"), TimeRange::Month);
        assert_eq!(TimeRange::parse_lenient(""), TimeRange::Month);
        assert_eq!(TimeRange::Week.as_str(), "week");
    }
}
