//! Core state management for the sticky task list.
//! This crate owns every task-list invariant; view layers only read and call.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{StoreConfig, DEFAULT_TASKS_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Filter, ParseFilterError, Task, TaskId, TaskValidationError};
pub use repo::kv_store::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use repo::task_repo::{StoreError, StoreResult, TaskRepository};
pub use service::task_store::{RenderObserver, TaskStats, TaskStore, Transition, ViewState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
