// UndoManager - Manages undo/redo stacks of edits

use crate::change::ChangeError;
use crate::edit::Edit;
use crate::history::config::{DEFAULT_MAX_HISTORY, HistoryConfig};
use crate::messaging::channels::HistoryEventProducer;
use crate::messaging::event::{HistoryEvent, HistoryEventKind};
use crate::model::{CellId, GraphModel};
use ringbuf::traits::Producer;
use std::collections::VecDeque;

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors that can occur while replaying history
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("Replay failed: {0}")]
    Replay(#[from] ChangeError),
}

/// Manages edit replay and undo/redo functionality
///
/// The UndoManager maintains two stacks:
/// - Undo stack: Edits that have been applied and can be undone
/// - Redo stack: Edits that have been undone and can be redone
///
/// When a new edit is recorded:
/// 1. Seal it and push it onto the undo stack
/// 2. Clear the redo stack (since we're on a new timeline)
/// 3. Evict the oldest edits beyond the history limit
///
/// Undoing and redoing on an empty stack does nothing.
pub struct UndoManager {
    /// Edits that can be undone (most recent at the back)
    undo_stack: VecDeque<Edit>,

    /// Edits that can be redone (next to redo at the back)
    redo_stack: VecDeque<Edit>,

    /// Maximum number of edits to keep in history, 0 for no limit
    max_history: usize,

    events: Option<HistoryEventProducer>,
}

impl UndoManager {
    /// Create a new UndoManager with default settings
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }

    /// Create a new UndoManager with a custom history limit (0 = unbounded)
    pub fn with_capacity(max_history: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_history),
            redo_stack: VecDeque::new(),
            max_history,
            events: None,
        }
    }

    pub fn with_config(config: &HistoryConfig) -> Self {
        Self::with_capacity(config.max_history)
    }

    /// Publish a [`HistoryEvent`] after every stack transition
    pub fn set_event_producer(&mut self, events: Option<HistoryEventProducer>) {
        self.events = events;
    }

    /// Add an applied edit to the history
    ///
    /// The edit is sealed, pushed onto the undo stack, the redo stack is
    /// cleared and the oldest edits are evicted if the limit is exceeded.
    pub fn record(&mut self, mut edit: Edit) {
        edit.seal();
        log::debug!("Recording edit '{}' ({} changes)", edit.description(), edit.len());
        let description = edit.description().to_string();

        self.undo_stack.push_back(edit);
        self.redo_stack.clear();
        self.publish(HistoryEventKind::Added { description });
        self.trim();
    }

    /// Undo the last significant edit
    ///
    /// Insignificant edits on top of the stack are undone along with it.
    /// Returns the description of the undone edit, or `None` if there was
    /// nothing to undo.
    ///
    /// # Errors
    /// Fails if an edit refers to a cell that no longer exists. Neither the
    /// model nor the stacks are modified in that case.
    pub fn undo(&mut self, model: &mut GraphModel) -> HistoryResult<Option<String>> {
        let description = Self::replay(&mut self.undo_stack, &mut self.redo_stack, model)
            .inspect_err(|e| log::warn!("Undo failed: {}", e))?;
        if let Some(description) = &description {
            log::debug!("Undo '{}'", description);
            self.publish(HistoryEventKind::Undone {
                description: description.clone(),
            });
        }
        Ok(description)
    }

    /// Redo the last undone significant edit
    ///
    /// Insignificant edits are redone until a significant one has been.
    /// Returns the description of the redone edit, or `None` if there was
    /// nothing to redo.
    ///
    /// # Errors
    /// Same as [`UndoManager::undo`].
    pub fn redo(&mut self, model: &mut GraphModel) -> HistoryResult<Option<String>> {
        let description = Self::replay(&mut self.redo_stack, &mut self.undo_stack, model)
            .inspect_err(|e| log::warn!("Redo failed: {}", e))?;
        if let Some(description) = &description {
            log::debug!("Redo '{}'", description);
            self.publish(HistoryEventKind::Redone {
                description: description.clone(),
            });
        }
        Ok(description)
    }

    /// Move edits from the back of `from` to the back of `to`, replaying each,
    /// up to and including the first significant one
    fn replay(
        from: &mut VecDeque<Edit>,
        to: &mut VecDeque<Edit>,
        model: &mut GraphModel,
    ) -> HistoryResult<Option<String>> {
        let mut span = 0;
        for edit in from.iter().rev() {
            edit.validate(model)?;
            span += 1;
            if edit.is_significant() {
                break;
            }
        }

        let mut description = None;
        for _ in 0..span {
            let Some(mut edit) = from.pop_back() else {
                break;
            };
            edit.execute(model)?;
            description = Some(edit.description().to_string());
            to.push_back(edit);
        }
        Ok(description)
    }

    /// Check if there are edits that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are edits that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get a description of the edit that would be undone
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(Edit::description)
    }

    /// Get a description of the edit that would be redone
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(Edit::description)
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.publish(HistoryEventKind::Cleared);
    }

    /// Get the number of edits in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of edits in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Change the history limit, evicting the oldest edits right away if needed
    pub fn set_max_history(&mut self, max_history: usize) {
        self.max_history = max_history;
        self.trim();
    }

    /// Drop every edit that can no longer be replayed because it touches one
    /// of the given (removed) cells
    ///
    /// History is a chain: an older edit can only be undone after every newer
    /// one. So an edit referencing a removed cell takes all older edits with
    /// it, and a redo-able edit referencing one takes every edit that would be
    /// redone after it. Returns the number of dropped edits.
    pub fn purge_cells(&mut self, cells: &[CellId]) -> usize {
        if cells.is_empty() {
            return 0;
        }
        let purged = Self::purge_stack(&mut self.undo_stack, cells)
            + Self::purge_stack(&mut self.redo_stack, cells);
        if purged > 0 {
            log::debug!("Purged {} edits referencing removed cells", purged);
            self.publish(HistoryEventKind::Purged { count: purged });
        }
        purged
    }

    /// Both stacks replay from the back, so everything in front of the newest
    /// stale edit is unreachable too.
    fn purge_stack(stack: &mut VecDeque<Edit>, cells: &[CellId]) -> usize {
        let newest_stale = stack
            .iter()
            .rposition(|edit| cells.iter().any(|cell| edit.references(*cell)));
        match newest_stale {
            Some(index) => stack.drain(..=index).count(),
            None => 0,
        }
    }

    fn trim(&mut self) {
        if self.max_history == 0 || self.undo_stack.len() <= self.max_history {
            return;
        }
        let excess = self.undo_stack.len() - self.max_history;
        self.undo_stack.drain(..excess);
        self.publish(HistoryEventKind::Trimmed { count: excess });
    }

    fn publish(&mut self, kind: HistoryEventKind) {
        let event = HistoryEvent {
            kind,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        };
        if let Some(events) = self.events.as_mut() {
            if events.try_push(event).is_err() {
                log::warn!("History event channel full, notification dropped");
            }
        }
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}
