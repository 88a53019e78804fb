//! State graph: nodes + static and conditional edges, compile and invoke.
//!
//! Aligns with LangGraph `StateGraph`: add nodes, wire them with `add_edge` or
//! `add_conditional_edges`, compile, then invoke with state. Conditional edges use closed
//! [`Route`] enums so every outcome is checked against the path map at compile time.

mod compile_error;
mod compiled;
pub mod logging;
mod node;
mod node_middleware;
mod route;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
pub use node::Node;
pub use node_middleware::{NodeMiddleware, NodeRunFn, NodeRunFuture};
pub use route::{route_fn, FnRouter, Route, Router};
pub use state_graph::{StateGraph, END, START};
