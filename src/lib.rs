// Diagram Edit - transactional change tracking and undo/redo for diagram models

pub mod change;
pub mod edit;
pub mod history;
pub mod messaging;
pub mod model;

// Re-export commonly used types for convenience
pub use change::{AtomicChange, ChangeError, ChangeResult, UndoableChange};
pub use edit::{Edit, Transaction};
pub use history::{HistoryConfig, HistoryError, HistoryResult, UndoManager};
pub use messaging::channels::{
    EventListeners, connect_listeners, create_history_event_channel, create_model_event_channel,
};
pub use messaging::event::{HistoryEvent, HistoryEventKind, ModelEvent};
pub use model::{AppliedStyle, Cell, CellId, CellValue, GraphModel, ModelError, TerminalEnd};
