//! Task list domain model.
//!
//! # Responsibility
//! - Define the task record shared by the store, the repository codec and
//!   the view layer.
//! - Define the presentation filter applied on read.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` that is never reused.
//! - Filters select a subset for presentation and never mutate tasks.

pub mod task;
