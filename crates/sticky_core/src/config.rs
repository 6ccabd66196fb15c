//! Store configuration.

/// Storage key of the persisted task collection.
pub const DEFAULT_TASKS_KEY: &str = "sticky_todos_v1";

/// Settings shared by the repository and the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key under which the serialized task collection lives.
    pub tasks_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Builds a config using `key`, falling back to the default when blank.
    pub fn with_tasks_key(key: &str) -> Self {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        Self {
            tasks_key: trimmed.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_TASKS_KEY};

    #[test]
    fn blank_key_falls_back_to_default() {
        assert_eq!(StoreConfig::with_tasks_key("  ").tasks_key, DEFAULT_TASKS_KEY);
        assert_eq!(StoreConfig::with_tasks_key(" work ").tasks_key, "work");
    }
}
