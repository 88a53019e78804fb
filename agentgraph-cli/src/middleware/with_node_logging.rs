//! Extension trait for the fluent build chain: attach node logging, then compile.

use std::sync::Arc;

use agentgraph::{GraphState, StateGraph};

use super::logging::LoggingMiddleware;

pub trait WithNodeLogging {
    /// Returns the same graph with `LoggingMiddleware` attached. Chain with `.compile()?`.
    fn with_node_logging(self) -> Self;
}

impl<S> WithNodeLogging for StateGraph<S>
where
    S: GraphState,
{
    fn with_node_logging(self) -> Self {
        self.with_middleware(Arc::new(LoggingMiddleware))
    }
}
