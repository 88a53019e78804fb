//! Run entry points for the three agents: chat, self-RAG and multi-step web search.
//!
//! Each agent has a `run_*` function that wires real collaborators from [`RunConfig`] and a
//! `run_*_with` variant that takes them injected (used by tests with `MockLlm`).

pub use crate::config::Error;

mod chat;
mod common;
mod config_summary;
mod rag;
mod search;

use crate::config::{RunConfig, RunOptions};

pub use chat::{run_chat, run_chat_with};
pub use config_summary::config_summary;
pub use rag::{run_rag, run_rag_with, RagOutcome};
pub use search::{run_search, run_search_with};

/// Which agent a run drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Agent {
    Chat,
    Rag,
    Search,
}

impl Agent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Rag => "rag",
            Self::Search => "search",
        }
    }
}

/// Loads `.env`, builds `RunConfig` from env and applies `options`.
pub fn config_with_options(options: &RunOptions) -> Result<RunConfig, Error> {
    dotenv::dotenv().ok();
    let mut config = RunConfig::from_env()?;
    config.apply_options(options);
    Ok(config)
}
