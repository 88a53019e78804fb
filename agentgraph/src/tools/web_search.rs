//! `web_search` tool over a search engine.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AgentError;
use crate::search::{SearchEngine, SearchParams};

use super::{Tool, ToolSpec};

/// Tool name the model calls.
pub const WEB_SEARCH: &str = "web_search";

#[derive(Deserialize)]
struct WebSearchArgs {
    query: String,
}

/// Searches the web for the model and returns the hits as text.
pub struct WebSearchTool {
    engine: Arc<dyn SearchEngine>,
    params: SearchParams,
}

impl WebSearchTool {
    /// Up to five results per call.
    pub fn new(engine: Arc<dyn SearchEngine>) -> Self {
        Self {
            engine,
            params: SearchParams {
                limit: 5,
                ..SearchParams::default()
            },
        }
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: WEB_SEARCH.to_string(),
            description: Some("Search the internet for the given query".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "What to search for"}
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<String, AgentError> {
        let args: WebSearchArgs = serde_json::from_value(args).map_err(|e| {
            AgentError::ExecutionFailed(format!("{}: invalid arguments: {}", WEB_SEARCH, e))
        })?;
        let results = self.engine.search(&args.query, &self.params).await?;
        tracing::debug!(query = %args.query, results = results.len(), "Web search tool");
        if results.is_empty() {
            return Ok(format!("No results for: {}", args.query));
        }
        Ok(results
            .iter()
            .map(|r| format!("Title: {}\nURL: {}\nContent: {}\n", r.title, r.url, r.content))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
