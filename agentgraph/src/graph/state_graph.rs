//! State graph builder: nodes + static edges + conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` and
//! `add_conditional_edges(from, router, path_map)` using `START` and `END` for graph entry and
//! exit, then `compile` or `compile_with_checkpointer` to get a `CompiledStateGraph`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;
use crate::graph::route::{ErasedRouter, Route, Router, TypedRouter};
use crate::memory::Checkpointer;
use crate::state::GraphState;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// Outgoing edge of a node (or of START).
#[derive(Clone)]
pub(crate) enum Edge<S> {
    Static(String),
    Conditional(ConditionalEdge<S>),
}

#[derive(Clone)]
pub(crate) struct ConditionalEdge<S> {
    pub(crate) router: Arc<dyn ErasedRouter<S>>,
    /// Route label → target node id (or END).
    pub(crate) path_map: HashMap<&'static str, String>,
}

/// State graph: nodes plus static and conditional edges.
///
/// Generic over state type `S`. Cycles are allowed only through conditional edges; the static
/// topology must be acyclic.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>` and `Arc<dyn Router<S, R>>`; produces
/// `CompiledStateGraph<S>`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Outgoing edges in insertion order; duplicates are reported at compile time.
    edges: Vec<(String, Edge<S>)>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    recursion_limit: usize,
}

impl<S> Default for StateGraph<S>
where
    S: GraphState,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: GraphState,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            middleware: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Adds a node; id must be unique. Replaces if same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds a static edge from `from_id` to `to_id`.
    ///
    /// Use `START` for graph entry and `END` for graph exit.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), Edge::Static(to_id.into())));
        self
    }

    /// Adds a conditional edge: after `from_id` runs, `router` picks a route and the graph
    /// follows `path_map[route]`.
    ///
    /// Every variant in `R::variants()` must appear in `path_map`; `compile` fails otherwise.
    pub fn add_conditional_edges<R, I, T>(
        &mut self,
        from_id: impl Into<String>,
        router: Arc<dyn Router<S, R>>,
        path_map: I,
    ) -> &mut Self
    where
        R: Route,
        I: IntoIterator<Item = (R, T)>,
        T: Into<String>,
    {
        let path_map = path_map
            .into_iter()
            .map(|(route, target)| (route.label(), target.into()))
            .collect();
        let edge = ConditionalEdge {
            router: Arc::new(TypedRouter { router }),
            path_map,
        };
        self.edges.push((from_id.into(), Edge::Conditional(edge)));
        self
    }

    /// Wraps every node run with `middleware` (e.g. enter/exit logging).
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Sets the maximum number of node executions per invocation.
    pub fn with_recursion_limit(self, recursion_limit: usize) -> Self {
        Self {
            recursion_limit,
            ..self
        }
    }

    /// Builds the executable graph after validating the topology.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(None)
    }

    /// Builds the executable graph with a checkpointer for per-thread persistence.
    ///
    /// When `invoke(state, config)` is called with `config.thread_id`, the prior state is
    /// loaded before the run and the final state saved after it.
    pub fn compile_with_checkpointer(
        self,
        checkpointer: Arc<dyn Checkpointer<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(Some(checkpointer))
    }

    fn compile_internal(
        self,
        checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        let StateGraph {
            nodes,
            edges,
            middleware,
            recursion_limit,
        } = self;

        let mut outgoing: HashMap<String, Edge<S>> = HashMap::new();
        for (from, edge) in edges {
            if from != START && !nodes.contains_key(&from) {
                return Err(CompilationError::NodeNotFound(from));
            }
            if outgoing.contains_key(&from) {
                return Err(CompilationError::DuplicateEdge(from));
            }
            outgoing.insert(from, edge);
        }

        if !outgoing.contains_key(START) {
            return Err(CompilationError::MissingStart);
        }

        let mut reaches_end = false;
        for (from, edge) in &outgoing {
            match edge {
                Edge::Static(to) => {
                    check_target(&nodes, to)?;
                    reaches_end |= to == END;
                }
                Edge::Conditional(cond) => {
                    for label in cond.router.declared_labels() {
                        let to = cond.path_map.get(label).ok_or_else(|| {
                            CompilationError::UnmappedRoute {
                                node: from.clone(),
                                label: label.to_string(),
                            }
                        })?;
                        check_target(&nodes, to)?;
                        reaches_end |= to == END;
                    }
                }
            }
        }
        if !reaches_end {
            return Err(CompilationError::MissingEnd);
        }

        let mut ids: Vec<&String> = nodes.keys().collect();
        ids.sort();
        for id in ids {
            if !outgoing.contains_key(id) {
                return Err(CompilationError::MissingEdge(id.clone()));
            }
        }

        check_static_acyclic(&outgoing)?;

        Ok(CompiledStateGraph {
            nodes,
            edges: outgoing,
            checkpointer,
            middleware,
            recursion_limit,
        })
    }
}

fn check_target<S: GraphState>(
    nodes: &HashMap<String, Arc<dyn Node<S>>>,
    to: &str,
) -> Result<(), CompilationError> {
    if to == END || nodes.contains_key(to) {
        Ok(())
    } else {
        Err(CompilationError::NodeNotFound(to.to_string()))
    }
}

/// Fails when static edges alone form a cycle. Each node has at most one outgoing edge, so
/// following static edges from every node either reaches a non-static edge, END, or repeats.
fn check_static_acyclic<S>(outgoing: &HashMap<String, Edge<S>>) -> Result<(), CompilationError> {
    let mut cleared: HashSet<&str> = HashSet::new();
    let mut starts: Vec<&String> = outgoing.keys().collect();
    starts.sort();
    for start in starts {
        let mut path: HashSet<&str> = HashSet::new();
        let mut current = start.as_str();
        while let Some(Edge::Static(next)) = outgoing.get(current) {
            if cleared.contains(current) {
                break;
            }
            if !path.insert(current) {
                return Err(CompilationError::StaticCycle(current.to_string()));
            }
            current = next.as_str();
        }
        cleared.extend(path);
    }
    Ok(())
}
