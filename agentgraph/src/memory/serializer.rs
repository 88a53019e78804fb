//! State <-> bytes codec for persistent checkpointers.
//!
//! The stored blob is opaque to the engine; no cross-version schema is promised.

use crate::memory::checkpointer::CheckpointError;

/// Encodes and decodes a workflow state for storage.
///
/// Used by [`SqliteSaver`](super::SqliteSaver). [`MemorySaver`](super::MemorySaver) keeps
/// states as values and needs no codec.
pub trait Serializer<S>: Send + Sync {
    fn serialize(&self, state: &S) -> Result<Vec<u8>, CheckpointError>;
    fn deserialize(&self, bytes: &[u8]) -> Result<S, CheckpointError>;
}

/// JSON codec; the state must be `Serialize + DeserializeOwned`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl<S> Serializer<S> for JsonSerializer
where
    S: serde::Serialize + serde::de::DeserializeOwned,
{
    fn serialize(&self, state: &S) -> Result<Vec<u8>, CheckpointError> {
        serde_json::to_vec(state).map_err(|e| CheckpointError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<S, CheckpointError> {
        serde_json::from_slice(bytes).map_err(|e| CheckpointError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct ChatLike {
        messages: Vec<Message>,
    }

    /// **Scenario**: A state holding messages survives encode/decode.
    #[test]
    fn json_serializer_keeps_messages() {
        let state = ChatLike {
            messages: vec![Message::user("hi"), Message::assistant("hello")],
        };
        let bytes = JsonSerializer.serialize(&state).unwrap();
        let restored: ChatLike = JsonSerializer.deserialize(&bytes).unwrap();
        assert_eq!(state, restored);
    }

    /// **Scenario**: Invalid JSON on deserialize returns CheckpointError::Serialization.
    #[test]
    fn json_serializer_invalid_json_returns_serialization_error() {
        let result: Result<ChatLike, _> = JsonSerializer.deserialize(b"{ not valid json ]");
        match result {
            Err(CheckpointError::Serialization(s)) => assert!(!s.is_empty()),
            other => panic!("expected Serialization error, got {:?}", other),
        }
    }
}
