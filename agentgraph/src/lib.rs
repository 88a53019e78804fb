//! # agentgraph
//!
//! A LangGraph-style workflow engine for LLM agents. Build stateful agents with a simple
//! **state-in, state-out** design: one typed state struct flows through nodes, edges are static
//! or chosen by a router, and every run can be checkpointed per conversation thread.
//!
//! ## Design Principles
//!
//! - **Single state type**: each graph uses one state struct (e.g. `SelfRagState`) that all
//!   nodes read from and write to. [`GraphState::merge_input`] decides how a resumed thread
//!   absorbs new caller input.
//! - **Typed routing**: conditional edges return variants of a closed [`Route`] enum;
//!   `compile` rejects a graph that leaves any variant unmapped.
//! - **Bounded loops**: cycles exist only through routers and every invocation runs at most
//!   `recursion_limit` nodes.
//! - **Injected collaborators**: LLMs, retrievers and search engines are traits the nodes
//!   close over; there is no global model registry.
//!
//! ## Main Modules
//!
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `Route`, `Router`: build and run graphs.
//! - [`memory`]: checkpointers (`MemorySaver`, optional `SqliteSaver`) and `RunnableConfig`.
//! - [`llm`]: `LlmClient` trait, `MockLlm`, and `ChatOpenAI` behind feature `openai`.
//! - [`grader`]: binary yes/no graders with retry.
//! - [`self_rag`]: self-correcting retrieval QA graph.
//! - [`vanilla_rag`]: single-step retrieval chat, no grading.
//! - [`planner`]: dependency-ordered multi-step web search.
//! - [`chatbot`]: multi-turn chat graph; [`tools`] it can call.
//!
//! ## Features
//!
//! - `sqlite` (default): persistent checkpointer.
//! - `openai`: OpenAI-compatible chat client via `async-openai`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agentgraph::self_rag::{build_self_rag_graph, SelfRagConfig, SelfRagState};
//! use agentgraph::retriever::{HashingEmbedder, InMemoryRetriever, Retriever};
//! use agentgraph::{MemorySaver, MockLlm, RunnableConfig};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let llm = Arc::new(MockLlm::with_fallback(r#"{"binary_score": "yes"}"#));
//! let retriever = Arc::new(InMemoryRetriever::new(Arc::new(HashingEmbedder::default())));
//! retriever.insert(&["Rust has no garbage collector.".to_string()]).await.unwrap();
//!
//! let graph = build_self_rag_graph(llm, retriever, SelfRagConfig::default())
//!     .compile_with_checkpointer(Arc::new(MemorySaver::<SelfRagState>::new()))
//!     .unwrap();
//! let out = graph
//!     .invoke(SelfRagState::ask("Does Rust use a GC?"), Some(RunnableConfig::for_thread("t1")))
//!     .await
//!     .unwrap();
//! println!("{:?}", out.last_answer());
//! # }
//! ```

pub mod chatbot;
pub mod error;
pub mod grader;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod planner;
pub mod retriever;
pub mod search;
pub mod self_rag;
pub mod state;
pub mod stream;
pub mod tools;
pub mod vanilla_rag;

pub use error::AgentError;
pub use graph::{
    route_fn, CompilationError, CompiledStateGraph, Node, NodeMiddleware, NodeRunFn,
    NodeRunFuture, Route, Router, StateGraph, DEFAULT_RECURSION_LIMIT, END, START,
};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use llm::{LlmClient, LlmResponse, MockLlm, ResponseFormat};
pub use memory::{
    Checkpoint, CheckpointError, CheckpointMetadata, Checkpointer, JsonSerializer, MemorySaver,
    RunnableConfig,
};
#[cfg(feature = "sqlite")]
pub use memory::SqliteSaver;
pub use message::{Message, Role, ToolCall};
pub use state::GraphState;
pub use stream::{StreamEvent, StreamMode};
pub use tools::{Tool, ToolSpec};
