// History configuration, stored as RON

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default maximum number of edits kept in history
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Default capacity of the notification channels
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),
}

/// Settings for an [`UndoManager`](crate::history::UndoManager)
///
/// Missing fields fall back to their defaults, e.g. `(max_history: 20)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Edits kept in the undo stack; 0 means unbounded
    pub max_history: usize,
    /// Capacity for model and history event channels
    pub event_capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl HistoryConfig {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}
