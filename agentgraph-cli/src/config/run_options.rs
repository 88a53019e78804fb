//! Optional overrides for a run (CLI args or programmatic).
//!
//! Used by [`RunConfig::apply_options`](super::RunConfig::apply_options). All fields are
//! optional; only set fields override the base config from env.

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub temperature: Option<f32>,
    pub model: Option<String>,
    /// Thread id for checkpointed conversations.
    pub thread_id: Option<String>,
    pub db_path: Option<String>,
    pub recursion_limit: Option<usize>,
    pub top_k: Option<usize>,
    pub searxng_url: Option<String>,
    /// Turn page scraping on (never off; env decides the default).
    pub scrape_urls: bool,
    pub check_hallucination: bool,
    /// Give the chat agent the web search tool.
    pub web_search: bool,
    /// Use the single-step RAG graph.
    pub vanilla: bool,
    pub verbose: bool,
}
