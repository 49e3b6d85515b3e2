use crate::{
    error::{KanbanError, Result},
    storage::validate_key,
};
use serde::{Deserialize, Serialize};

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the storage entry holding the board
    pub storage_key: String,
    /// Capacity of the persistence warning channel
    pub warning_buffer: usize,
}

impl StoreConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "kanban-storage";
    pub const DEFAULT_WARNING_BUFFER: usize = 16;

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_key(&self.storage_key).map_err(|_| {
            KanbanError::ConfigError(format!(
                "storage_key {:?} must be non-empty and use only letters, digits, '-' or '_'",
                self.storage_key
            ))
        })?;

        if self.warning_buffer == 0 {
            return Err(KanbanError::ConfigError(
                "warning_buffer must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            warning_buffer: Self::DEFAULT_WARNING_BUFFER,
        }
    }
}
