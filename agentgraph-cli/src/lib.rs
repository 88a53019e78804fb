//! agentgraph-cli library: reusable run logic behind the `agentgraph` binary.
//!
//! Reads OpenAI-compatible config from env / .env, builds the chat, self-RAG or web-search
//! graph from `agentgraph` and runs it, returning the final state.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), agentgraph_cli::Error> {
//! use agentgraph_cli::{config_with_options, run_chat, RunOptions};
//!
//! let config = config_with_options(&RunOptions::default())?;
//! let state = run_chat(&config, "Hello!").await?;
//! println!("{:?}", state.last_reply());
//! # Ok(())
//! # }
//! ```

mod cli;
mod config;
mod logging;
mod middleware;
mod run;

pub use cli::{joined, Cli, Command};
pub use config::{Error, RunConfig, RunOptions};
pub use logging::init_tracing;
pub use middleware::{LoggingMiddleware, WithNodeLogging};
pub use run::{
    config_summary, config_with_options, run_chat, run_chat_with, run_rag, run_rag_with,
    run_search, run_search_with, Agent, RagOutcome,
};

#[cfg(test)]
mod tests;
