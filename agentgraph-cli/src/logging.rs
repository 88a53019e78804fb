//! Tracing subscriber for the binary: stderr, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Without `RUST_LOG` the level is `warn`, or `debug` for the
/// agent crates when `verbose` is set. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,agentgraph=debug,agentgraph_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
