//! Plan, query and result records exchanged between planner stages.

use serde::{Deserialize, Serialize};

use crate::search::{SearchResult, TimeRange};

/// One step of a search plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPlanStep {
    pub id: usize,
    pub step: String,
    /// Ids of earlier steps whose results this step builds on.
    #[serde(default)]
    pub dependencies: Vec<usize>,
}

/// One search-engine query generated for a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default, deserialize_with = "lenient_time_range")]
    pub time_range: TimeRange,
}

fn lenient_time_range<'de, D>(deserializer: D) -> Result<TimeRange, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(TimeRange::parse_lenient).unwrap_or_default())
}

/// A search hit plus whatever enrichment the step applied to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultData {
    pub search_query: String,
    pub url: String,
    pub title: String,
    /// Snippet from the search engine.
    pub content: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub body_markdown: String,
    #[serde(default)]
    pub body_text: String,
    /// Query-focused summary of the page (or the snippet when pages are not scraped).
    #[serde(default)]
    pub concised_content: String,
}

impl From<SearchResult> for ResultData {
    fn from(r: SearchResult) -> Self {
        Self {
            search_query: r.search_query,
            url: r.url,
            title: r.title,
            content: r.content,
            ..Self::default()
        }
    }
}

impl ResultData {
    /// `[title](url)`
    pub fn reference_markdown(&self) -> String {
        format!("[{}]({})", self.title, self.url)
    }

    /// Text used as evidence: the concise summary, or the snippet when there is none.
    pub fn evidence(&self) -> &str {
        if self.concised_content.is_empty() {
            &self.content
        } else {
            &self.concised_content
        }
    }
}

/// Everything one plan step produced. Built once, never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub id: usize,
    pub step: String,
    pub results: Vec<ResultData>,
    pub summary: String,
}

impl StepResult {
    /// Renders the step's evidence, skipping results whose evidence repeats an earlier one.
    pub fn results_text(&self) -> String {
        let mut text = format!("Step {}: {}\n", self.id, self.step);
        if self.results.is_empty() {
            text.push_str("No results");
            return text;
        }
        let mut seen: Vec<&str> = Vec::new();
        for result in &self.results {
            let evidence = result.evidence();
            if seen.contains(&evidence) {
                continue;
            }
            seen.push(evidence);
            text.push_str(&format!(
                "Title: {}\nURL: {}\nContent: {}\n",
                result.title, result.url, evidence
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, concised: &str) -> ResultData {
        ResultData {
            title: title.into(),
            url: format!("https://{}", title),
            content: "snippet".into(),
            concised_content: concised.into(),
            ..ResultData::default()
        }
    }

    /// **Scenario**: Results with the same concise content render once.
    #[test]
    fn results_text_dedups_by_concised_content() {
        let step = StepResult {
            id: 1,
            step: "find".into(),
            results: vec![hit("a", "same"), hit("b", "same"), hit("c", "other")],
            summary: String::new(),
        };
        let text = step.results_text();
        assert!(text.starts_with("Step 1: find\n"));
        assert!(text.contains("Title: a\nURL: https://a\nContent: same\n"));
        assert!(!text.contains("Title: b"));
        assert!(text.contains("Content: other"));
    }

    #[test]
    fn results_text_without_results() {
        let step = StepResult {
            id: 0,
            step: "nothing".into(),
            results: vec![],
            summary: String::new(),
        };
        assert_eq!(step.results_text(), "Step 0: nothing\nNo results");
    }

    /// **Scenario**: Unknown or missing time ranges fall back to month.
    #[test]
    fn search_query_time_range_is_lenient() {
        let q: SearchQuery =
            serde_json::from_str(r#"{"query": "q", "time_range": "Decade"}"#).unwrap();
        assert_eq!(q.time_range, TimeRange::Month);
        let q: SearchQuery = serde_json::from_str(r#"{"query": "q", "time_range": "WEEK"}"#).unwrap();
        assert_eq!(q.time_range, TimeRange::Week);
        let q: SearchQuery = serde_json::from_str(r#"{"query": "q"}"#).unwrap();
        assert_eq!(q.time_range, TimeRange::Month);
        assert_eq!(hit("t", "").reference_markdown(), "[t](https://t)");
    }
}
