//! SQLite checkpointer: one row per thread, state stored as an opaque blob.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use super::checkpointer::require_thread_id;
use super::{
    Checkpoint, CheckpointError, CheckpointMetadata, Checkpointer, RunnableConfig, Serializer,
};

/// Persistent checkpointer backed by a SQLite file.
///
/// Each `put` overwrites the thread's row (`ON CONFLICT DO UPDATE`); rows are never expired.
/// Blocking SQLite calls run on the tokio blocking pool.
pub struct SqliteSaver<S> {
    conn: Arc<Mutex<Connection>>,
    serializer: Arc<dyn Serializer<S>>,
}

impl<S> SqliteSaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Opens (or creates) the database at `path` and ensures the checkpoint table exists.
    pub fn new(
        path: impl AsRef<Path>,
        serializer: Arc<dyn Serializer<S>>,
    ) -> Result<Self, CheckpointError> {
        let conn = Connection::open(path).map_err(storage)?;
        Self::with_connection(conn, serializer)
    }

    /// In-memory database, mainly for tests.
    pub fn in_memory(serializer: Arc<dyn Serializer<S>>) -> Result<Self, CheckpointError> {
        let conn = Connection::open_in_memory().map_err(storage)?;
        Self::with_connection(conn, serializer)
    }

    fn with_connection(
        conn: Connection,
        serializer: Arc<dyn Serializer<S>>,
    ) -> Result<Self, CheckpointError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS checkpoints (
                thread_id     TEXT PRIMARY KEY,
                checkpoint_id TEXT NOT NULL,
                step          INTEGER NOT NULL,
                last_node     TEXT,
                created_at_ms TEXT NOT NULL,
                state         BLOB NOT NULL
            );",
        )
        .map_err(storage)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            serializer,
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, CheckpointError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| CheckpointError::Storage("sqlite connection poisoned".into()))?;
            f(&guard).map_err(storage)
        })
        .await
        .map_err(|e| CheckpointError::Storage(e.to_string()))?
    }
}

fn storage(e: rusqlite::Error) -> CheckpointError {
    CheckpointError::Storage(e.to_string())
}

#[async_trait]
impl<S> Checkpointer<S> for SqliteSaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let thread_id = require_thread_id(config)?.to_string();
        let blob = self.serializer.serialize(&checkpoint.state)?;
        let id = checkpoint.id.clone();
        let meta = checkpoint.metadata.clone();
        let stored_id = id.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO checkpoints (thread_id, checkpoint_id, step, last_node, created_at_ms, state)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(thread_id) DO UPDATE SET
                    checkpoint_id = excluded.checkpoint_id,
                    step = excluded.step,
                    last_node = excluded.last_node,
                    created_at_ms = excluded.created_at_ms,
                    state = excluded.state",
                params![
                    thread_id,
                    id,
                    meta.step as i64,
                    meta.last_node,
                    meta.created_at_ms.to_string(),
                    blob
                ],
            )
            .map(|_| ())
        })
        .await?;
        Ok(stored_id)
    }

    async fn get(&self, config: &RunnableConfig) -> Result<Option<Checkpoint<S>>, CheckpointError> {
        let thread_id = require_thread_id(config)?.to_string();
        let row = self
            .with_conn(move |conn| {
                conn.query_row(
                    "SELECT checkpoint_id, step, last_node, created_at_ms, state
                     FROM checkpoints WHERE thread_id = ?1",
                    params![thread_id],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, i64>(1)?,
                            row.get::<_, Option<String>>(2)?,
                            row.get::<_, String>(3)?,
                            row.get::<_, Vec<u8>>(4)?,
                        ))
                    },
                )
                .optional()
            })
            .await?;

        let Some((id, step, last_node, created_at_ms, blob)) = row else {
            return Ok(None);
        };
        let state = self.serializer.deserialize(&blob)?;
        Ok(Some(Checkpoint {
            id,
            state,
            metadata: CheckpointMetadata {
                step: step.max(0) as u64,
                last_node,
                created_at_ms: created_at_ms.parse().unwrap_or(0),
            },
        }))
    }

    async fn delete(&self, thread_id: &str) -> Result<(), CheckpointError> {
        let thread_id = thread_id.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM checkpoints WHERE thread_id = ?1",
                params![thread_id],
            )
            .map(|_| ())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::JsonSerializer;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Notes {
        lines: Vec<String>,
    }

    /// **Scenario**: put then get round-trips state and metadata; second put overwrites.
    #[tokio::test]
    async fn sqlite_put_get_overwrite() {
        let saver = SqliteSaver::<Notes>::in_memory(Arc::new(JsonSerializer)).unwrap();
        let cfg = RunnableConfig::for_thread("t1");
        let first = Notes {
            lines: vec!["a".into()],
        };
        saver
            .put(&cfg, &Checkpoint::from_state(first, 2, Some("chat".into())))
            .await
            .unwrap();
        let second = Notes {
            lines: vec!["a".into(), "b".into()],
        };
        saver
            .put(&cfg, &Checkpoint::from_state(second.clone(), 5, None))
            .await
            .unwrap();

        let cp = saver.get(&cfg).await.unwrap().expect("row exists");
        assert_eq!(cp.state, second);
        assert_eq!(cp.metadata.step, 5);
        assert!(cp.metadata.last_node.is_none());
    }

    /// **Scenario**: A file-backed saver keeps checkpoints across reopen; delete removes them.
    #[tokio::test]
    async fn sqlite_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cp.db");
        let cfg = RunnableConfig::for_thread("t2");
        {
            let saver = SqliteSaver::<Notes>::new(&path, Arc::new(JsonSerializer)).unwrap();
            saver
                .put(
                    &cfg,
                    &Checkpoint::from_state(
                        Notes {
                            lines: vec!["kept".into()],
                        },
                        1,
                        None,
                    ),
                )
                .await
                .unwrap();
        }
        let saver = SqliteSaver::<Notes>::new(&path, Arc::new(JsonSerializer)).unwrap();
        let cp = saver.get(&cfg).await.unwrap().expect("persisted");
        assert_eq!(cp.state.lines, vec!["kept".to_string()]);

        saver.delete("t2").await.unwrap();
        assert!(saver.get(&cfg).await.unwrap().is_none());
    }
}
