//! Run config: model endpoint, persistence and agent options. Filled from env / .env.
//!
//! Converted into the library's `SelfRagConfig`, `VanillaRagConfig`, `PlannerConfig`,
//! `ChatConfig` and `RunnableConfig` by the run entry points.

use agentgraph::chatbot::ChatConfig;
use agentgraph::planner::PlannerConfig;
use agentgraph::self_rag::SelfRagConfig;
use agentgraph::vanilla_rag::VanillaRagConfig;
use agentgraph::{RunnableConfig, DEFAULT_RECURSION_LIMIT};

use super::RunOptions;

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Run config for the `agentgraph` binary.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// OpenAI-compatible API base URL, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    pub api_key: String,
    /// Model name, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Sampling temperature 0–2. Default: unset (use API default).
    pub temperature: Option<f32>,
    /// Conversation thread; when set, state is checkpointed in `db_path`.
    pub thread_id: Option<String>,
    /// SQLite database for checkpoints. Defaults to "checkpoints.db".
    pub db_path: String,
    /// Maximum node executions per invocation.
    pub recursion_limit: usize,
    /// System prompt for the chat agent (and prefix of the vanilla RAG prompt).
    pub system_prompt: Option<String>,
    /// Offer the chat model a `web_search` tool backed by `searxng_url`.
    pub chat_web_search: bool,
    /// Answer RAG questions in one retrieval step, without graders.
    pub rag_vanilla: bool,
    /// Documents retrieved per question.
    pub rag_top_k: usize,
    /// Run the grounding grader on generated answers.
    pub check_hallucination: bool,
    /// SearXNG instance used by the search agent.
    pub searxng_url: String,
    pub search_result_limit: usize,
    pub scrape_urls: bool,
    pub concise_step_results: bool,
    /// Debug logs (node enter/exit, routing).
    pub verbose: bool,
}

impl RunConfig {
    /// Fill config from env vars. Call `dotenv::dotenv().ok()` first to include `.env`.
    ///
    /// `OPENAI_API_KEY` required; everything else has a default:
    /// `OPENAI_API_BASE`, `OPENAI_MODEL`, `OPENAI_TEMPERATURE`, `THREAD_ID`, `DB_PATH`,
    /// `RECURSION_LIMIT`, `CHAT_SYSTEM_PROMPT`, `CHAT_WEB_SEARCH`, `RAG_TOP_K`, `RAG_VANILLA`,
    /// `CHECK_HALLUCINATION`, `SEARXNG_URL`, `SEARCH_RESULT_LIMIT`, `SCRAPE_URLS`, `CONCISE_STEP_RESULTS`.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "OPENAI_API_KEY is not set; please configure it in .env",
            )
        })?;
        Ok(Self {
            api_key,
            api_base: env_or("OPENAI_API_BASE", "https://api.openai.com/v1"),
            model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            temperature: env_parsed("OPENAI_TEMPERATURE"),
            thread_id: std::env::var("THREAD_ID").ok().filter(|s| !s.is_empty()),
            db_path: env_or("DB_PATH", "checkpoints.db"),
            recursion_limit: env_parsed("RECURSION_LIMIT").unwrap_or(DEFAULT_RECURSION_LIMIT),
            system_prompt: std::env::var("CHAT_SYSTEM_PROMPT").ok(),
            chat_web_search: env_flag("CHAT_WEB_SEARCH"),
            rag_vanilla: env_flag("RAG_VANILLA"),
            rag_top_k: env_parsed("RAG_TOP_K").unwrap_or(3),
            check_hallucination: env_flag("CHECK_HALLUCINATION"),
            searxng_url: env_or("SEARXNG_URL", "http://localhost:8080"),
            search_result_limit: env_parsed("SEARCH_RESULT_LIMIT").unwrap_or(3),
            scrape_urls: env_flag("SCRAPE_URLS"),
            concise_step_results: env_flag("CONCISE_STEP_RESULTS"),
            verbose: false,
        })
    }

    /// Apply overrides from `RunOptions`; only set fields override.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(t) = options.temperature {
            self.temperature = Some(t);
        }
        if let Some(model) = &options.model {
            self.model = model.clone();
        }
        if let Some(tid) = &options.thread_id {
            self.thread_id = Some(tid.clone());
        }
        if let Some(path) = &options.db_path {
            self.db_path = path.clone();
        }
        if let Some(limit) = options.recursion_limit {
            self.recursion_limit = limit;
        }
        if let Some(k) = options.top_k {
            self.rag_top_k = k;
        }
        if let Some(url) = &options.searxng_url {
            self.searxng_url = url.clone();
        }
        if options.scrape_urls {
            self.scrape_urls = true;
        }
        if options.check_hallucination {
            self.check_hallucination = true;
        }
        if options.web_search {
            self.chat_web_search = true;
        }
        if options.vanilla {
            self.rag_vanilla = true;
        }
        self.verbose = options.verbose;
    }

    pub fn with_thread_id(mut self, thread_id: &str) -> Self {
        self.thread_id = Some(thread_id.to_string());
        self
    }

    /// Invoke config: thread id (if any) and step budget.
    pub fn runnable_config(&self) -> RunnableConfig {
        let config = match &self.thread_id {
            Some(tid) => RunnableConfig::for_thread(tid.clone()),
            None => RunnableConfig::default(),
        };
        config.with_recursion_limit(self.recursion_limit)
    }

    pub fn self_rag_config(&self) -> SelfRagConfig {
        SelfRagConfig::default()
            .with_top_k(self.rag_top_k)
            .with_check_hallucination(self.check_hallucination)
    }

    pub fn vanilla_rag_config(&self) -> VanillaRagConfig {
        let config = VanillaRagConfig::default().with_top_k(self.rag_top_k);
        match &self.system_prompt {
            Some(prompt) => config.with_system_prompt(prompt.clone()),
            None => config,
        }
    }

    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig::default()
            .with_search_result_limit(self.search_result_limit)
            .with_scrape_urls(self.scrape_urls)
            .with_concise_step_results(self.concise_step_results)
    }

    pub fn chat_config(&self) -> ChatConfig {
        match &self.system_prompt {
            Some(prompt) => ChatConfig::default().with_system_prompt(prompt.clone()),
            None => ChatConfig::default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// `1`, `true`, `yes`, `on` (any case) are true; anything else, or unset, is false.
fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
