//! Graph definition error.
//!
//! Returned by `StateGraph::compile` when the topology is malformed. Fatal at build time.

use thiserror::Error;

/// Error when compiling a state graph (dangling reference, missing entry, static cycle).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// An edge source or target (other than START/END) was not registered via `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge leaves START, so the graph has no entry point.
    #[error("graph must have an edge from START")]
    MissingStart,

    /// No edge or route reaches END, so the graph has no terminal.
    #[error("graph must have at least one edge to END")]
    MissingEnd,

    /// A node has no outgoing edge.
    #[error("node has no outgoing edge: {0}")]
    MissingEdge(String),

    /// A node (or START) was given more than one outgoing edge.
    #[error("node has more than one outgoing edge: {0}")]
    DuplicateEdge(String),

    /// A declared route label has no target in the path map.
    #[error("route {label} of node {node} has no target")]
    UnmappedRoute { node: String, label: String },

    /// Static edges form a cycle; cycles are allowed only through routers.
    #[error("static edges form a cycle through node: {0}")]
    StaticCycle(String),
}
