//! SearxNG JSON API client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AgentError;

use super::{SearchEngine, SearchParams, SearchResult};

#[derive(Debug, Deserialize)]
struct SearxngResponse {
    #[serde(default)]
    results: Vec<SearxngHit>,
}

#[derive(Debug, Deserialize)]
struct SearxngHit {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

/// Search engine backed by a SearxNG instance (`GET {base_url}/search?format=json`).
pub struct SearxngSearch {
    client: reqwest::Client,
    base_url: String,
}

impl SearxngSearch {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Uses a custom client (timeouts, proxies).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Keeps the first `limit` hits, tagging each with the query.
fn into_results(body: SearxngResponse, query: &str, limit: usize) -> Vec<SearchResult> {
    body.results
        .into_iter()
        .take(limit)
        .map(|hit| SearchResult {
            search_query: query.to_string(),
            url: hit.url,
            title: hit.title,
            content: hit.content,
        })
        .collect()
}

#[async_trait]
impl SearchEngine for SearxngSearch {
    async fn search(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<Vec<SearchResult>, AgentError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("language", params.locale.as_str()),
                ("time_range", params.time_range.as_str()),
                ("categories", params.categories.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AgentError::ExecutionFailed(format!(
                "search request failed with status: {}",
                response.status()
            )));
        }

        match response.json::<SearxngResponse>().await {
            Ok(body) => Ok(into_results(body, query, params.limit)),
            Err(e) => {
                tracing::error!(query, error = %e, "Unreadable search response");
                Ok(Vec::new())
            }
        }
    }
}
