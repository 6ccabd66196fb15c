//! Persistence backend contracts and implementations.
//!
//! # Responsibility
//! - Define the synchronous string key-value contract the store persists through.
//! - Encode/decode the task collection under its storage key.
//!
//! # Invariants
//! - Only the task collection is persisted; filter and selection are ephemeral.
//! - Loading never fails; writing propagates backend errors.

pub mod kv_store;
pub mod task_repo;
