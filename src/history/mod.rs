// Undo/redo history
//
// The UndoManager keeps two stacks of sealed edits. Undo and redo both
// replay an edit forward; which of the two happened is only a matter of
// which stack the edit moves to.

pub mod config;
pub mod manager;

pub use config::{ConfigError, HistoryConfig};
pub use manager::{HistoryError, HistoryResult, UndoManager};
