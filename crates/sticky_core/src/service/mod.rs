//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory task state and apply mutations against it.
//! - Keep view layers decoupled from storage details.

pub mod task_store;
