//! # Memory: per-thread checkpointing
//!
//! A [`Checkpointer`] persists the state of a conversation thread so a graph can be invoked
//! incrementally across independent calls (e.g. separate chat turns) and resume from the last
//! persisted state.
//!
//! [`RunnableConfig`] is passed to `CompiledStateGraph::invoke`:
//! - `thread_id`: identifies the conversation; required when the graph has a checkpointer.
//! - `resume_at`: optional node to start from instead of the entry.
//! - `recursion_limit`: optional per-call override of the step budget.
//!
//! | Type             | Persistence | Feature  |
//! |------------------|-------------|----------|
//! | [`MemorySaver`]  | In-memory   | none     |
//! | [`SqliteSaver`]  | SQLite file | `sqlite` |
//!
//! [`JsonSerializer`] encodes state for `SqliteSaver`.

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;
mod serializer;

#[cfg(feature = "sqlite")]
mod sqlite_saver;

pub use checkpoint::{Checkpoint, CheckpointMetadata};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::MemorySaver;
pub use serializer::{JsonSerializer, Serializer};

#[cfg(feature = "sqlite")]
pub use sqlite_saver::SqliteSaver;
