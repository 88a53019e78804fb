//! Checkpoint record: the persisted state of one conversation thread.

use std::time::SystemTime;

/// Metadata saved next to the state snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointMetadata {
    /// Number of node executions in the invocation that produced this checkpoint.
    pub step: u64,
    /// Id of the last node that ran before the checkpoint was taken.
    pub last_node: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub created_at_ms: u128,
}

/// One checkpoint: state snapshot plus id and metadata.
///
/// Stored by a [`Checkpointer`](super::Checkpointer) under the thread id. A new invocation on
/// the same thread overwrites the previous record.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    pub id: String,
    pub state: S,
    pub metadata: CheckpointMetadata,
}

impl<S> Checkpoint<S> {
    /// Creates a checkpoint from the final state of an invocation.
    pub fn from_state(state: S, step: u64, last_node: Option<String>) -> Self {
        let created_at_ms = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self {
            id: format!("{}-{}", created_at_ms, step),
            state,
            metadata: CheckpointMetadata {
                step,
                last_node,
                created_at_ms,
            },
        }
    }
}
