//! Vanilla RAG graph with a scripted LLM: ingestion, context prompt and thread history.

use std::sync::Arc;

use agentgraph::retriever::{HashingEmbedder, InMemoryRetriever, Retriever};
use agentgraph::vanilla_rag::{build_vanilla_rag_graph, VanillaRagConfig, VanillaRagState};
use agentgraph::{Checkpointer, MemorySaver, MockLlm, Role, RunnableConfig};

fn retriever() -> Arc<InMemoryRetriever> {
    Arc::new(InMemoryRetriever::new(Arc::new(HashingEmbedder::default())))
}

/// **Scenario**: An empty conversation ingests `data_list` and never calls the model.
#[tokio::test]
async fn empty_conversation_ingests_data() {
    let llm = Arc::new(MockLlm::new());
    let store = retriever();
    let graph = build_vanilla_rag_graph(llm.clone(), store.clone(), VanillaRagConfig::default())
        .compile()
        .unwrap();

    let out = graph
        .invoke(
            VanillaRagState::ingest(vec!["Ferris is the Rust mascot.".into()]),
            None,
        )
        .await
        .unwrap();

    assert!(out.messages.is_empty());
    assert_eq!(llm.call_count(), 0);
    let docs = store.retrieve("Rust mascot", 1).await.unwrap();
    assert_eq!(docs[0].content, "Ferris is the Rust mascot.");
}

/// **Scenario**: A question is answered in one model call with the retrieved text inside the
/// system prompt.
#[tokio::test]
async fn answers_with_retrieved_context() {
    let llm = Arc::new(MockLlm::scripted(["Ferris."]));
    let store = retriever();
    store
        .insert(&["Ferris is the Rust mascot.".to_string()])
        .await
        .unwrap();
    let config = VanillaRagConfig::default().with_system_prompt("You are a crab expert.");
    let graph = build_vanilla_rag_graph(llm.clone(), store, config)
        .compile()
        .unwrap();

    let out = graph
        .invoke(VanillaRagState::ask("Who is the Rust mascot?"), None)
        .await
        .unwrap();

    assert_eq!(out.last_answer(), Some("Ferris."));
    assert_eq!(out.relevant_docs.len(), 1);
    assert_eq!(llm.call_count(), 1);
    let request = &llm.requests()[0];
    assert_eq!(request[0].role, Role::System);
    assert!(request[0].content.starts_with("You are a crab expert.\n"));
    assert!(request[0].content.contains("Ferris is the Rust mascot."));
    assert_eq!(request[1].content, "Who is the Rust mascot?");
}

/// **Scenario**: A second turn on the same thread refreshes the single system prompt, keeps the
/// history and leaves retrieved documents out of the checkpoint.
#[tokio::test]
async fn second_turn_replaces_system_prompt() {
    let llm = Arc::new(MockLlm::scripted(["Ferris.", "A crab."]));
    let store = retriever();
    store
        .insert(&[
            "Ferris is the Rust mascot.".to_string(),
            "Ferris is a crab.".to_string(),
        ])
        .await
        .unwrap();
    let saver = Arc::new(MemorySaver::<VanillaRagState>::new());
    let graph = build_vanilla_rag_graph(llm.clone(), store, VanillaRagConfig::default())
        .compile_with_checkpointer(saver.clone())
        .unwrap();
    let config = RunnableConfig::for_thread("t");

    graph
        .invoke(VanillaRagState::ask("Who is the mascot?"), Some(config.clone()))
        .await
        .unwrap();
    let out = graph
        .invoke(VanillaRagState::ask("What animal is it?"), Some(config.clone()))
        .await
        .unwrap();

    let roles: Vec<Role> = out.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        [Role::System, Role::User, Role::Assistant, Role::User, Role::Assistant]
    );
    assert_eq!(out.last_answer(), Some("A crab."));
    assert_eq!(llm.requests()[1].len(), 4);

    let saved = saver.get(&config).await.unwrap().expect("checkpoint saved");
    assert!(saved.state.relevant_docs.is_empty());
    assert_eq!(saved.state.messages.len(), 5);
}
