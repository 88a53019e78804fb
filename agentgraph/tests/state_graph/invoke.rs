//! Invoke behavior: ordering, routing, loop limit, undeclared labels, node failures, streaming.

use agentgraph::{
    route_fn, AgentError, RunnableConfig, StateGraph, StreamEvent, StreamMode, END, START,
};
use tokio_stream::StreamExt;

use crate::common::{FailingNode, Narrow, RecordNode, Retry, TraceState};

fn retry_loop(limit: usize) -> StateGraph<TraceState> {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("attempt", RecordNode::new("attempt"))
        .add_node("rewrite", RecordNode::new("rewrite"))
        .add_edge(START, "attempt")
        .add_conditional_edges(
            "attempt",
            route_fn(|_: &TraceState| Retry::Again),
            [(Retry::Again, "rewrite"), (Retry::Done, END)],
        )
        .add_edge("rewrite", "attempt");
    graph.with_recursion_limit(limit)
}

#[tokio::test]
async fn invoke_runs_linear_chain_in_order() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordNode::new("a"))
        .add_node("b", RecordNode::new("b"))
        .add_node("c", RecordNode::new("c"))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", "c")
        .add_edge("c", END);
    let out = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default(), None)
        .await
        .unwrap();
    assert_eq!(out.visits, vec!["a", "b", "c"]);
}

/// **Scenario**: The router stops the loop once enough attempts were recorded.
#[tokio::test]
async fn invoke_follows_router_until_done() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("attempt", RecordNode::new("attempt"))
        .add_node("rewrite", RecordNode::new("rewrite"))
        .add_edge(START, "attempt")
        .add_conditional_edges(
            "attempt",
            route_fn(|s: &TraceState| {
                if s.visits.len() >= 5 {
                    Retry::Done
                } else {
                    Retry::Again
                }
            }),
            [(Retry::Again, "rewrite"), (Retry::Done, END)],
        )
        .add_edge("rewrite", "attempt");
    let out = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default(), None)
        .await
        .unwrap();
    assert_eq!(
        out.visits,
        vec!["attempt", "rewrite", "attempt", "rewrite", "attempt"]
    );
}

/// **Scenario**: A router that always loops trips the step budget instead of running forever.
#[tokio::test]
async fn invoke_fails_when_loop_limit_exceeded() {
    let compiled = retry_loop(7).compile().unwrap();
    match compiled.invoke(TraceState::default(), None).await {
        Err(AgentError::LoopLimitExceeded { limit }) => assert_eq!(limit, 7),
        other => panic!("expected LoopLimitExceeded, got {:?}", other),
    }
}

/// **Scenario**: A per-invocation limit overrides the graph default.
#[tokio::test]
async fn invoke_config_limit_overrides_graph_limit() {
    let compiled = retry_loop(100).compile().unwrap();
    let config = RunnableConfig::default().with_recursion_limit(3);
    let err = compiled
        .invoke(TraceState::default(), Some(config))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::LoopLimitExceeded { limit: 3 }));
    assert!(err.to_string().contains("loop limit"));
}

/// **Scenario**: An outcome outside the router's declared variants fails the run.
#[tokio::test]
async fn invoke_fails_on_undeclared_route_label() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("judge", RecordNode::new("judge"))
        .add_edge(START, "judge")
        .add_conditional_edges(
            "judge",
            route_fn(|_: &TraceState| Narrow::Reject),
            [(Narrow::Accept, END)],
        );
    let compiled = graph.compile().unwrap();
    match compiled.invoke(TraceState::default(), None).await {
        Err(AgentError::RouterLabel { node, label }) => {
            assert_eq!(node, "judge");
            assert_eq!(label, "reject");
        }
        other => panic!("expected RouterLabel, got {:?}", other),
    }
}

#[tokio::test]
async fn invoke_propagates_node_error() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordNode::new("a"))
        .add_node("fail", std::sync::Arc::new(FailingNode))
        .add_edge(START, "a")
        .add_edge("a", "fail")
        .add_edge("fail", END);
    let err = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::ExecutionFailed(m) if m == "retriever unavailable"));
}

/// **Scenario**: Update events name each executed node; a loop-limit failure ends the stream
/// with an error event.
#[tokio::test]
async fn stream_reports_updates_then_error() {
    let compiled = retry_loop(3).compile().unwrap();
    let events: Vec<_> = compiled
        .stream(TraceState::default(), None, [StreamMode::Updates])
        .collect()
        .await;

    let nodes: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            StreamEvent::Updates { node_id, .. } => Some(node_id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(nodes, vec!["attempt", "rewrite", "attempt"]);
    assert!(matches!(events.last(), Some(StreamEvent::Error(m)) if m.contains("loop limit")));
}
