//! Per-thread checkpointing: save after invoke, merge input on the next call, resume_at.

use std::sync::Arc;

use agentgraph::{Checkpointer, MemorySaver, RunnableConfig, StateGraph, END, START};

use crate::common::{RecordNode, TraceState};

fn two_step_graph(checkpointer: Arc<dyn Checkpointer<TraceState>>) -> agentgraph::CompiledStateGraph<TraceState> {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("load", RecordNode::new("load"))
        .add_node("answer", RecordNode::new("answer"))
        .add_edge(START, "load")
        .add_edge("load", "answer")
        .add_edge("answer", END);
    graph.compile_with_checkpointer(checkpointer).unwrap()
}

fn input(text: &str) -> TraceState {
    TraceState {
        visits: vec![],
        inputs: vec![text.to_string()],
    }
}

/// **Scenario**: The second call on a thread starts from the saved state plus new input.
#[tokio::test]
async fn invoke_same_thread_accumulates_state() {
    let saver = Arc::new(MemorySaver::<TraceState>::new());
    let compiled = two_step_graph(saver.clone());
    let config = RunnableConfig::for_thread("t1");

    compiled.invoke(input("first"), Some(config.clone())).await.unwrap();
    let out = compiled.invoke(input("second"), Some(config.clone())).await.unwrap();

    assert_eq!(out.inputs, vec!["first", "second"]);
    assert_eq!(out.visits, vec!["load", "answer", "load", "answer"]);

    let saved = saver.get(&config).await.unwrap().unwrap();
    assert_eq!(saved.state, out);
    assert_eq!(saved.metadata.step, 2);
    assert_eq!(saved.metadata.last_node.as_deref(), Some("answer"));
}

#[tokio::test]
async fn invoke_different_threads_are_isolated() {
    let saver = Arc::new(MemorySaver::<TraceState>::new());
    let compiled = two_step_graph(saver.clone());

    compiled
        .invoke(input("a"), Some(RunnableConfig::for_thread("a")))
        .await
        .unwrap();
    let out = compiled
        .invoke(input("b"), Some(RunnableConfig::for_thread("b")))
        .await
        .unwrap();
    assert_eq!(out.inputs, vec!["b"]);
    assert_eq!(saver.len(), 2);
}

/// **Scenario**: resume_at skips the entry router and continues from the named node.
#[tokio::test]
async fn invoke_resumes_at_named_node() {
    let saver = Arc::new(MemorySaver::<TraceState>::new());
    let compiled = two_step_graph(saver);
    let config = RunnableConfig::for_thread("resume");

    compiled.invoke(input("q"), Some(config.clone())).await.unwrap();
    let out = compiled
        .invoke(TraceState::default(), Some(config.clone().with_resume_at("answer")))
        .await
        .unwrap();
    assert_eq!(out.visits, vec!["load", "answer", "answer"]);

    let err = compiled
        .invoke(TraceState::default(), Some(config.with_resume_at("nowhere")))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unknown resume node"));
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn sqlite_saver_survives_reopen() {
    use agentgraph::{JsonSerializer, SqliteSaver};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkpoints.db");
    let config = RunnableConfig::for_thread("persisted");

    {
        let saver = SqliteSaver::<TraceState>::new(&path, Arc::new(JsonSerializer)).unwrap();
        two_step_graph(Arc::new(saver))
            .invoke(input("before restart"), Some(config.clone()))
            .await
            .unwrap();
    }

    let saver = SqliteSaver::<TraceState>::new(&path, Arc::new(JsonSerializer)).unwrap();
    let out = two_step_graph(Arc::new(saver))
        .invoke(input("after restart"), Some(config))
        .await
        .unwrap();
    assert_eq!(out.inputs, vec!["before restart", "after restart"]);
}
