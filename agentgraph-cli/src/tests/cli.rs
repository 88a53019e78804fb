//! Unit tests for argument parsing ([`Cli`](crate::cli::Cli)).

use clap::Parser;

use crate::cli::{joined, Cli, Command};
use crate::run::Agent;

#[test]
fn chat_joins_message_words() {
    let cli = Cli::try_parse_from(["agentgraph", "chat", "hello", "there"]).unwrap();
    assert_eq!(cli.agent(), Agent::Chat);
    match &cli.command {
        Command::Chat { message, .. } => assert_eq!(joined(message).as_deref(), Some("hello there")),
        other => panic!("expected chat, got {:?}", other),
    }
}

/// **Scenario**: Global flags are accepted after the subcommand and become run options.
#[test]
fn global_flags_become_run_options() {
    let cli = Cli::try_parse_from([
        "agentgraph",
        "rag",
        "--thread-id",
        "t1",
        "--top-k",
        "5",
        "--ingest",
        "a.txt",
        "--ingest",
        "b.txt",
        "-v",
        "what",
        "is",
        "rust",
    ])
    .unwrap();
    let options = cli.run_options();
    assert_eq!(options.thread_id.as_deref(), Some("t1"));
    assert_eq!(options.top_k, Some(5));
    assert!(options.verbose);
    match &cli.command {
        Command::Rag {
            ingest, question, ..
        } => {
            assert_eq!(ingest.len(), 2);
            assert_eq!(joined(question).as_deref(), Some("what is rust"));
        }
        other => panic!("expected rag, got {:?}", other),
    }
}

#[test]
fn search_flags_map_to_options() {
    let cli = Cli::try_parse_from([
        "agentgraph",
        "search",
        "--scrape-urls",
        "--searxng-url",
        "http://searx:8888",
        "rust",
        "news",
    ])
    .unwrap();
    let options = cli.run_options();
    assert!(options.scrape_urls);
    assert_eq!(options.searxng_url.as_deref(), Some("http://searx:8888"));
    assert_eq!(options.top_k, None);
}

#[test]
fn chat_and_rag_mode_flags_map_to_options() {
    let cli = Cli::try_parse_from(["agentgraph", "chat", "--web-search", "news", "today"]).unwrap();
    assert!(cli.run_options().web_search);
    assert!(!cli.run_options().vanilla);

    let cli = Cli::try_parse_from(["agentgraph", "rag", "--vanilla", "what"]).unwrap();
    assert!(cli.run_options().vanilla);
    assert!(
        Cli::try_parse_from(["agentgraph", "rag", "--vanilla", "--check-hallucination", "q"])
            .is_err()
    );
}

#[test]
fn missing_or_unknown_arguments_fail() {
    assert!(Cli::try_parse_from(["agentgraph", "chat"]).is_err());
    assert!(Cli::try_parse_from(["agentgraph", "--invalid-flag-xyz", "chat", "x"]).is_err());
    assert!(Cli::try_parse_from(["agentgraph"]).is_err());
}

#[test]
fn joined_trims_and_rejects_empty() {
    assert_eq!(joined(&[]), None);
    assert_eq!(joined(&["  ".to_string()]), None);
}
