//! Command-line arguments (clap derive). Flags override env config via [`RunOptions`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::RunOptions;
use crate::run::Agent;

#[derive(Parser, Debug)]
#[command(name = "agentgraph")]
#[command(about = "Run the chat, self-RAG or multi-step web search agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Conversation thread; state is checkpointed and resumed across runs.
    #[arg(long, global = true, value_name = "ID")]
    pub thread_id: Option<String>,

    /// SQLite file for checkpoints (default from DB_PATH or checkpoints.db).
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<String>,

    /// Model name (overrides OPENAI_MODEL).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature 0–2.
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Maximum node executions per run.
    #[arg(long, global = true, value_name = "N")]
    pub recursion_limit: Option<usize>,

    /// Debug logs on stderr: config summary, node enter/exit, routing.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat with the model; use --thread-id for a multi-turn session.
    Chat {
        /// Let the model search the web through SearXNG.
        #[arg(long)]
        web_search: bool,

        /// SearXNG base URL (overrides SEARXNG_URL).
        #[arg(long, value_name = "URL")]
        searxng_url: Option<String>,

        #[arg(required = true, trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Answer a question from local text files with self-correcting retrieval.
    Rag {
        /// Text file to ingest before asking (repeatable).
        #[arg(long = "ingest", value_name = "FILE")]
        ingest: Vec<PathBuf>,

        /// Documents retrieved per question.
        #[arg(long)]
        top_k: Option<usize>,

        /// Also check answers are grounded in the documents.
        #[arg(long)]
        check_hallucination: bool,

        /// Answer in one retrieval step without grading.
        #[arg(long, conflicts_with = "check_hallucination")]
        vanilla: bool,

        #[arg(trailing_var_arg = true)]
        question: Vec<String>,
    },
    /// Plan a multi-step web search and answer with references.
    Search {
        /// SearXNG base URL (overrides SEARXNG_URL).
        #[arg(long, value_name = "URL")]
        searxng_url: Option<String>,

        /// Fetch and summarize result pages.
        #[arg(long)]
        scrape_urls: bool,

        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },
}

impl Cli {
    pub fn agent(&self) -> Agent {
        match self.command {
            Command::Chat { .. } => Agent::Chat,
            Command::Rag { .. } => Agent::Rag,
            Command::Search { .. } => Agent::Search,
        }
    }

    /// Overrides carried by the flags.
    pub fn run_options(&self) -> RunOptions {
        let mut options = RunOptions {
            temperature: self.temperature,
            model: self.model.clone(),
            thread_id: self.thread_id.clone(),
            db_path: self.db_path.clone(),
            recursion_limit: self.recursion_limit,
            verbose: self.verbose,
            ..RunOptions::default()
        };
        match &self.command {
            Command::Chat {
                web_search,
                searxng_url,
                ..
            } => {
                options.web_search = *web_search;
                options.searxng_url = searxng_url.clone();
            }
            Command::Rag {
                top_k,
                check_hallucination,
                vanilla,
                ..
            } => {
                options.top_k = *top_k;
                options.check_hallucination = *check_hallucination;
                options.vanilla = *vanilla;
            }
            Command::Search {
                searxng_url,
                scrape_urls,
                ..
            } => {
                options.searxng_url = searxng_url.clone();
                options.scrape_urls = *scrape_urls;
            }
        }
        options
    }
}

/// Joins positional words into one text; `None` when nothing was given.
pub fn joined(words: &[String]) -> Option<String> {
    let text = words.join(" ").trim().to_string();
    (!text.is_empty()).then_some(text)
}
