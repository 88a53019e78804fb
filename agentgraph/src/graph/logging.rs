//! Structured logging for graph execution.
//!
//! Thin wrappers over `tracing` so the run loop emits the same fields everywhere.

use crate::error::AgentError;

pub fn log_graph_start(thread_id: Option<&str>, entry: &str) {
    tracing::info!(thread_id = thread_id.unwrap_or("-"), entry, "Starting graph execution");
}

pub fn log_node_start(node_id: &str, step: usize) {
    tracing::debug!(node_id, step, "Starting node execution");
}

pub fn log_node_complete(node_id: &str, next: Option<&str>) {
    tracing::debug!(node_id, next = next.unwrap_or("END"), "Node execution complete");
}

pub fn log_route(node_id: &str, label: &str, target: &str) {
    tracing::debug!(node_id, label, target, "Router decision");
}

pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps, "Graph execution complete");
}

pub fn log_graph_error(error: &AgentError) {
    tracing::error!(%error, "Graph execution error");
}
