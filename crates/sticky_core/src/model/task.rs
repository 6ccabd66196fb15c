//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its wire shape.
//! - Define the `all|active|completed` presentation filter.
//!
//! # Invariants
//! - `text` is trimmed and non-empty for every task created through `Task::new`.
//! - `id` is non-empty and stable for the task lifetime.
//! - Wire field names are `id`, `text`, `completed`, `createdAt`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Opaque, stable identifier of one task.
///
/// Stored as a plain string so ids written by earlier sessions load as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh id of the form `<created_at_ms>_<random hex>`.
    pub fn generate(created_at: i64) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("{created_at}_{}", &random[..12]))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validation errors for task invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text was empty after trimming.
    EmptyText,
    /// Id was an empty string.
    EmptyId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
            Self::EmptyId => write!(f, "task id cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Unix epoch milliseconds at creation. Informational only.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Task {
    /// Creates an incomplete task from raw user input.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyText` when `text` is empty or whitespace.
    pub fn new(text: &str) -> Result<Self, TaskValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }

        let created_at = now_epoch_ms();
        Ok(Self {
            id: TaskId::generate(created_at),
            text: trimmed.to_string(),
            completed: false,
            created_at,
        })
    }

    /// Checks invariants on records that did not come through `Task::new`.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Presentation subset applied when listing tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Returns whether `task` belongs to this subset.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unknown filter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError(pub String);

impl Display for ParseFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for ParseFilterError {}

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::{Filter, Task, TaskId, TaskValidationError};

    #[test]
    fn new_trims_text() {
        let task = Task::new("  buy milk \n").unwrap();
        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
        assert!(task.created_at > 0);
    }

    #[test]
    fn new_rejects_blank_text() {
        assert_eq!(Task::new("").unwrap_err(), TaskValidationError::EmptyText);
        assert_eq!(Task::new(" \t ").unwrap_err(), TaskValidationError::EmptyText);
    }

    #[test]
    fn generated_ids_embed_timestamp_and_differ() {
        let a = TaskId::generate(1_700_000_000_000);
        let b = TaskId::generate(1_700_000_000_000);
        assert!(a.as_str().starts_with("1700000000000_"));
        assert_ne!(a, b);
    }

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!(" Active ".parse::<Filter>().unwrap(), Filter::Active);
        assert_eq!("COMPLETED".parse::<Filter>().unwrap(), Filter::Completed);
        assert!("done".parse::<Filter>().is_err());
    }
}
