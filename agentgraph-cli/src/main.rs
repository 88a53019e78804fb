//! `agentgraph` binary: parse the subcommand, run the agent and print its answer.

use clap::Parser;

use agentgraph_cli::{
    config_summary, config_with_options, init_tracing, joined, run_chat, run_rag, run_search,
    Cli, Command, Error,
};

async fn run(cli: &Cli) -> Result<(), Error> {
    let config = config_with_options(&cli.run_options())?;
    if config.verbose {
        eprintln!("{}", config_summary(&config, cli.agent()));
    }

    match &cli.command {
        Command::Chat { message, .. } => {
            let message = joined(message).ok_or("empty message")?;
            let state = run_chat(&config, &message).await?;
            println!("{}", state.last_reply().unwrap_or_default());
        }
        Command::Rag {
            ingest, question, ..
        } => {
            let question = joined(question);
            if ingest.is_empty() && question.is_none() {
                return Err("nothing to do: pass --ingest <FILE> and/or a question".into());
            }
            let outcome = run_rag(&config, ingest, question.as_deref()).await?;
            match outcome.answer {
                Some(answer) => println!("{}", answer),
                None => println!("Ingested {} chunks.", outcome.chunks),
            }
        }
        Command::Search { query, .. } => {
            let query = joined(query).ok_or("empty query")?;
            let state = run_search(&config, &query).await?;
            println!("{}", state.answer);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
