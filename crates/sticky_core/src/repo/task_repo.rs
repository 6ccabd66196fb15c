//! Task collection codec over a key-value backend.
//!
//! # Responsibility
//! - Serialize the task collection as a JSON array under one storage key.
//! - Recover any unreadable stored state to an empty collection.
//!
//! # Invariants
//! - Record order on disk equals in-memory order.
//! - `load_tasks` never returns an error; `save_tasks` never swallows one.
//! - Loaded collections contain no duplicate ids and no invalid records.

use crate::config::StoreConfig;
use crate::model::task::Task;
use crate::repo::kv_store::{KeyValueStore, KvError};
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure to write the task collection.
#[derive(Debug)]
pub enum StoreError {
    Backend(KvError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(err) => write!(f, "failed to persist tasks: {err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Backend(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Reads and writes the task collection through a `KeyValueStore`.
pub struct TaskRepository<S: KeyValueStore> {
    backend: S,
    config: StoreConfig,
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn new(backend: S) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    pub fn with_config(backend: S, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Loads the persisted collection.
    ///
    /// Absent keys, backend read errors, unparsable JSON and non-array
    /// payloads all yield an empty collection. Inside an array, records that
    /// don't decode or validate are dropped individually, as are repeated ids.
    pub fn load_tasks(&self) -> Vec<Task> {
        let raw = match self.backend.get(&self.config.tasks_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=tasks_load module=repo status=ok reason=absent count=0");
                return Vec::new();
            }
            Err(err) => {
                warn!("event=tasks_load module=repo status=recovered reason=backend_error error={err}");
                return Vec::new();
            }
        };

        let records = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                warn!("event=tasks_load module=repo status=recovered reason=not_array");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=repo status=recovered reason=parse_error line={} column={}",
                    err.line(),
                    err.column()
                );
                return Vec::new();
            }
        };

        let total = records.len();
        let mut seen = HashSet::new();
        let tasks = records
            .into_iter()
            .filter_map(|record| serde_json::from_value::<Task>(record).ok())
            .filter(|task| task.validate().is_ok())
            .filter(|task| seen.insert(task.id.clone()))
            .collect::<Vec<_>>();

        if tasks.len() < total {
            warn!(
                "event=tasks_load module=repo status=recovered reason=invalid_records dropped={} count={}",
                total - tasks.len(),
                tasks.len()
            );
        } else {
            debug!("event=tasks_load module=repo status=ok count={}", tasks.len());
        }
        tasks
    }

    /// Writes the full collection, replacing the previous value.
    pub fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        let encoded = serde_json::to_string(tasks)?;
        self.backend.set(&self.config.tasks_key, &encoded)?;
        debug!(
            "event=tasks_save module=repo status=ok count={} bytes={}",
            tasks.len(),
            encoded.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TaskRepository;
    use crate::config::DEFAULT_TASKS_KEY;
    use crate::repo::kv_store::MemoryKvStore;

    #[test]
    fn drops_invalid_and_duplicate_records() {
        let raw = r#"[
            {"id":"a","text":"keep","completed":false,"createdAt":1},
            {"id":"b","text":"   ","completed":false,"createdAt":2},
            {"id":"c","text":"no flag","createdAt":3},
            {"id":"a","text":"dup","completed":true,"createdAt":4},
            42
        ]"#;
        let repo = TaskRepository::new(MemoryKvStore::with_entry(DEFAULT_TASKS_KEY, raw));

        let tasks = repo.load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "keep");
    }

    #[test]
    fn non_array_payload_loads_empty() {
        let repo = TaskRepository::new(MemoryKvStore::with_entry(
            DEFAULT_TASKS_KEY,
            r#"{"id":"a"}"#,
        ));
        assert!(repo.load_tasks().is_empty());
    }
}
