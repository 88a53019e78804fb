//! StateGraph compile failure cases: unknown node, missing entry or exit, unmapped route,
//! static cycle.

use agentgraph::{route_fn, CompilationError, StateGraph, END, START};

use crate::common::{RecordNode, Retry, TraceState};

#[tokio::test]
async fn compile_fails_when_edge_refers_to_unknown_node() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_node("echo", RecordNode::new("echo"));
    graph.add_edge(START, "echo");
    graph.add_edge("echo", "missing");

    match graph.compile() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "missing"),
        _ => panic!("expected NodeNotFound"),
    }
}

#[tokio::test]
async fn compile_fails_without_start_edge() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_node("a", RecordNode::new("a"));
    graph.add_edge("a", END);
    assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
}

#[tokio::test]
async fn compile_fails_when_nothing_reaches_end() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_node("a", RecordNode::new("a"));
    graph.add_node("b", RecordNode::new("b"));
    graph.add_edge(START, "a");
    graph.add_conditional_edges(
        "a",
        route_fn(|_: &TraceState| Retry::Again),
        [(Retry::Again, "b"), (Retry::Done, "a")],
    );
    graph.add_edge("b", "a");
    assert!(matches!(graph.compile(), Err(CompilationError::MissingEnd)));
}

#[tokio::test]
async fn compile_fails_when_node_has_no_outgoing_edge() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_node("a", RecordNode::new("a"));
    graph.add_node("orphan", RecordNode::new("orphan"));
    graph.add_edge(START, "a");
    graph.add_edge("a", END);
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::MissingEdge("orphan".into()))
    );
}

#[tokio::test]
async fn compile_fails_on_second_outgoing_edge() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_node("a", RecordNode::new("a"));
    graph.add_edge(START, "a");
    graph.add_edge("a", END);
    graph.add_edge("a", "a");
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::DuplicateEdge("a".into()))
    );
}

/// **Scenario**: A router whose path map omits a declared label is a definition error.
#[tokio::test]
async fn compile_fails_on_unmapped_route_label() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_node("a", RecordNode::new("a"));
    graph.add_edge(START, "a");
    graph.add_conditional_edges(
        "a",
        route_fn(|_: &TraceState| Retry::Done),
        [(Retry::Done, END)],
    );

    match graph.compile() {
        Err(CompilationError::UnmappedRoute { node, label }) => {
            assert_eq!(node, "a");
            assert_eq!(label, "retry");
        }
        other => panic!("expected UnmappedRoute, got {:?}", other.err()),
    }
}

/// **Scenario**: A route target that names no node is a definition error.
#[tokio::test]
async fn compile_fails_on_dangling_route_target() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_node("a", RecordNode::new("a"));
    graph.add_edge(START, "a");
    graph.add_conditional_edges(
        "a",
        route_fn(|_: &TraceState| Retry::Done),
        [(Retry::Done, END), (Retry::Again, "ghost")],
    );
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::NodeNotFound("ghost".into()))
    );
}

/// **Scenario**: Cycles made only of static edges are rejected.
#[tokio::test]
async fn compile_fails_on_static_cycle() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_node("a", RecordNode::new("a"));
    graph.add_node("b", RecordNode::new("b"));
    graph.add_node("c", RecordNode::new("c"));
    graph.add_edge(START, "a");
    graph.add_conditional_edges(
        "a",
        route_fn(|_: &TraceState| Retry::Done),
        [(Retry::Done, END), (Retry::Again, "b")],
    );
    graph.add_edge("b", "c");
    graph.add_edge("c", "b");
    assert!(matches!(
        graph.compile(),
        Err(CompilationError::StaticCycle(_))
    ));
}
