//! Workflow state contract.
//!
//! Every graph is generic over one explicitly typed state struct. The engine clones it between
//! nodes, persists it per thread and, on resumption, folds the caller's input into the
//! checkpointed value through [`GraphState::merge_input`].

use std::fmt::Debug;

use crate::message::Message;

/// State threaded through a graph invocation.
pub trait GraphState: Clone + Send + Sync + Debug + 'static {
    /// Folds caller-supplied `input` into `self`, the state restored from the thread checkpoint.
    ///
    /// Caller-supplied fields win. The default replaces the checkpoint wholesale; workflows
    /// with a conversation override this to append new messages instead.
    fn merge_input(self, input: Self) -> Self {
        input
    }

    /// Value written to the thread checkpoint after a successful run.
    ///
    /// The default keeps the whole state. Workflows drop per-invocation working data here.
    fn checkpoint_state(&self) -> Self {
        self.clone()
    }
}

/// Appends `input` to `resumed` (conversation reducer).
pub fn append_messages(mut resumed: Vec<Message>, input: Vec<Message>) -> Vec<Message> {
    resumed.extend(input);
    resumed
}

/// Returns `input` when the caller supplied a non-empty value, otherwise the resumed value.
pub fn override_non_empty(resumed: String, input: String) -> String {
    if input.is_empty() {
        resumed
    } else {
        input
    }
}
