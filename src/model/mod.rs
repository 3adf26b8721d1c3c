// GraphModel - authoritative state of the diagram
//
// The model owns every cell in an arena keyed by CellId. Changes never touch
// cell fields directly: they go through the six primitive mutators below,
// each of which swaps in a new value and hands back the one it replaced.
// Structural operations (insert/add/remove) are not recorded in history.

pub mod cell;
pub mod style;

pub use cell::{Cell, CellId, CellValue, TerminalEnd};
pub use style::AppliedStyle;

use crate::change::AtomicChange;
use crate::edit::Transaction;
use crate::messaging::channels::ModelEventProducer;
use crate::messaging::event::ModelEvent;
use ringbuf::traits::Producer;
use std::collections::HashMap;

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by the graph model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Unknown cell: {0}")]
    UnknownCell(CellId),

    #[error("Cell already in model: {0}")]
    DuplicateCell(CellId),
}

/// Mutable node/edge graph shared by the change engine and its collaborators
#[derive(Default)]
pub struct GraphModel {
    cells: HashMap<CellId, Cell>,
    root: Option<CellId>,
    events: Option<ModelEventProducer>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model that publishes a [`ModelEvent`] for every change
    pub fn with_events(events: ModelEventProducer) -> Self {
        Self {
            events: Some(events),
            ..Self::default()
        }
    }

    pub fn set_event_producer(&mut self, events: Option<ModelEventProducer>) {
        self.events = events;
    }

    /// Open a transaction. Changes made through it are applied immediately
    /// and recorded into one [`Edit`](crate::edit::Edit).
    pub fn begin_update(&mut self, description: impl Into<String>) -> Transaction<'_> {
        Transaction::new(self, description.into())
    }

    // ---------------------------------------------------------------------
    // Structural operations
    // ---------------------------------------------------------------------

    /// Insert a detached cell. Parent and children links are reset; use
    /// [`GraphModel::add_child`] to build the tree.
    pub fn insert_cell(&mut self, mut cell: Cell) -> ModelResult<CellId> {
        let id = cell.id;
        if self.cells.contains_key(&id) {
            return Err(ModelError::DuplicateCell(id));
        }
        cell.parent = None;
        cell.children.clear();
        self.cells.insert(id, cell);
        Ok(id)
    }

    /// Insert `cell` as the last child of `parent`
    pub fn add_child(&mut self, parent: CellId, cell: Cell) -> ModelResult<CellId> {
        if !self.cells.contains_key(&parent) {
            return Err(ModelError::UnknownCell(parent));
        }
        let id = self.insert_cell(cell)?;
        if let Some(child) = self.cells.get_mut(&id) {
            child.parent = Some(parent);
        }
        if let Some(parent_cell) = self.cells.get_mut(&parent) {
            parent_cell.children.push(id);
        }
        Ok(id)
    }

    /// Remove a cell and all of its descendants.
    ///
    /// Edges left pointing at a removed cell get that terminal cleared, and the
    /// root is unset if it was removed. Returns every removed id; pass them to
    /// [`UndoManager::purge_cells`](crate::history::UndoManager::purge_cells)
    /// so no edit is ever replayed against a cell that no longer exists.
    pub fn remove_cell(&mut self, id: CellId) -> ModelResult<Vec<CellId>> {
        let parent = self.cell(id)?.parent;

        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(cell) = self.cells.remove(&next) {
                pending.extend(cell.children.iter().copied());
                removed.push(next);
            }
        }

        if let Some(parent_cell) = parent.and_then(|p| self.cells.get_mut(&p)) {
            parent_cell.children.retain(|child| *child != id);
        }

        for cell in self.cells.values_mut() {
            for end in [TerminalEnd::Source, TerminalEnd::Target] {
                let terminal = cell.terminal_mut(end);
                if terminal.is_some_and(|t| removed.contains(&t)) {
                    *terminal = None;
                }
            }
        }

        if self.root.is_some_and(|root| removed.contains(&root)) {
            self.root = None;
        }

        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn cell(&self, id: CellId) -> ModelResult<&Cell> {
        self.cells.get(&id).ok_or(ModelError::UnknownCell(id))
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains_key(&id)
    }

    pub fn root(&self) -> Option<CellId> {
        self.root
    }

    pub fn value(&self, id: CellId) -> ModelResult<&CellValue> {
        Ok(&self.cell(id)?.value)
    }

    pub fn style(&self, id: CellId) -> ModelResult<&AppliedStyle> {
        Ok(&self.cell(id)?.style)
    }

    pub fn is_visible(&self, id: CellId) -> ModelResult<bool> {
        Ok(self.cell(id)?.visible)
    }

    pub fn is_collapsed(&self, id: CellId) -> ModelResult<bool> {
        Ok(self.cell(id)?.collapsed)
    }

    pub fn terminal(&self, id: CellId, end: TerminalEnd) -> ModelResult<Option<CellId>> {
        Ok(self.cell(id)?.terminal(end))
    }

    pub fn children(&self, id: CellId) -> ModelResult<&[CellId]> {
        Ok(&self.cell(id)?.children)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // ---------------------------------------------------------------------
    // Primitive mutators
    //
    // Crate-private: outside callers mutate through a change, which is what
    // gets published to listeners.
    // ---------------------------------------------------------------------

    /// Replace the root cell, returning the previous root
    pub(crate) fn root_changed(&mut self, root: Option<CellId>) -> ModelResult<Option<CellId>> {
        if let Some(id) = root {
            self.cell(id)?;
        }
        Ok(std::mem::replace(&mut self.root, root))
    }

    pub(crate) fn style_for_cell_changed(
        &mut self,
        id: CellId,
        style: AppliedStyle,
    ) -> ModelResult<AppliedStyle> {
        let cell = self.cell_mut(id)?;
        Ok(std::mem::replace(&mut cell.style, style))
    }

    pub(crate) fn visible_state_for_cell_changed(&mut self, id: CellId, visible: bool) -> ModelResult<bool> {
        let cell = self.cell_mut(id)?;
        Ok(std::mem::replace(&mut cell.visible, visible))
    }

    pub(crate) fn collapsed_state_for_cell_changed(
        &mut self,
        id: CellId,
        collapsed: bool,
    ) -> ModelResult<bool> {
        let cell = self.cell_mut(id)?;
        Ok(std::mem::replace(&mut cell.collapsed, collapsed))
    }

    /// Connect (or disconnect, with `None`) one end of an edge
    pub(crate) fn terminal_for_cell_changed(
        &mut self,
        id: CellId,
        terminal: Option<CellId>,
        end: TerminalEnd,
    ) -> ModelResult<Option<CellId>> {
        if let Some(terminal_id) = terminal {
            self.cell(terminal_id)?;
        }
        let cell = self.cell_mut(id)?;
        Ok(std::mem::replace(cell.terminal_mut(end), terminal))
    }

    pub(crate) fn value_for_cell_changed(&mut self, id: CellId, value: CellValue) -> ModelResult<CellValue> {
        let cell = self.cell_mut(id)?;
        Ok(std::mem::replace(&mut cell.value, value))
    }

    fn cell_mut(&mut self, id: CellId) -> ModelResult<&mut Cell> {
        self.cells.get_mut(&id).ok_or(ModelError::UnknownCell(id))
    }

    /// Publish an executed change. The payload is only built when a listener
    /// is attached.
    pub(crate) fn notify_change(&mut self, change: impl FnOnce() -> AtomicChange) {
        if self.events.is_some() {
            self.publish(ModelEvent::Changed(change()));
        }
    }

    /// Deliver an event to the listener, if any. A full channel drops the event.
    pub(crate) fn publish(&mut self, event: ModelEvent) {
        if let Some(events) = self.events.as_mut() {
            if events.try_push(event).is_err() {
                log::warn!("Model event channel full, notification dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with_vertex(value: &str) -> (GraphModel, CellId) {
        let mut model = GraphModel::new();
        let id = model.insert_cell(Cell::vertex(value)).unwrap();
        (model, id)
    }

    #[test]
    fn test_value_mutator_returns_prior() {
        let (mut model, id) = model_with_vertex("A");
        let prior = model.value_for_cell_changed(id, "B".into()).unwrap();
        assert_eq!(prior, CellValue::from("A"));
        assert_eq!(model.value(id).unwrap(), &CellValue::from("B"));
    }

    #[test]
    fn test_flag_mutators_return_prior() {
        let (mut model, id) = model_with_vertex("A");
        assert!(model.visible_state_for_cell_changed(id, false).unwrap());
        assert!(!model.is_visible(id).unwrap());
        assert!(!model.collapsed_state_for_cell_changed(id, true).unwrap());
        assert!(model.is_collapsed(id).unwrap());
    }

    #[test]
    fn test_style_mutator_replaces_wholesale() {
        let (mut model, id) = model_with_vertex("A");
        let style = AppliedStyle::new().with("fillColor", "red");
        let prior = model.style_for_cell_changed(id, style.clone()).unwrap();
        assert!(prior.is_empty());
        assert_eq!(model.style(id).unwrap(), &style);
    }

    #[test]
    fn test_terminal_mutator() {
        let mut model = GraphModel::new();
        let a = model.insert_cell(Cell::vertex("a")).unwrap();
        let edge = model.insert_cell(Cell::edge("e")).unwrap();

        let prior = model
            .terminal_for_cell_changed(edge, Some(a), TerminalEnd::Target)
            .unwrap();
        assert_eq!(prior, None);
        assert_eq!(model.terminal(edge, TerminalEnd::Target).unwrap(), Some(a));
        assert_eq!(model.terminal(edge, TerminalEnd::Source).unwrap(), None);
    }

    #[test]
    fn test_root_mutator_rejects_unknown_cell() {
        let mut model = GraphModel::new();
        let stranger = CellId::new();
        assert_eq!(
            model.root_changed(Some(stranger)),
            Err(ModelError::UnknownCell(stranger))
        );
        assert_eq!(model.root(), None);
    }

    #[test]
    fn test_mutators_on_unknown_cell_leave_model_untouched() {
        let (mut model, id) = model_with_vertex("A");
        let stranger = CellId::new();
        assert!(model.value_for_cell_changed(stranger, "X".into()).is_err());
        assert!(model
            .terminal_for_cell_changed(id, Some(stranger), TerminalEnd::Source)
            .is_err());
        assert_eq!(model.terminal(id, TerminalEnd::Source).unwrap(), None);
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut model = GraphModel::new();
        let cell = Cell::vertex("A");
        let copy = cell.clone();
        model.insert_cell(cell).unwrap();
        assert_eq!(
            model.insert_cell(copy.clone()),
            Err(ModelError::DuplicateCell(copy.id))
        );
    }

    #[test]
    fn test_remove_cell_takes_subtree_and_dangling_terminals() {
        let mut model = GraphModel::new();
        let root = model.insert_cell(Cell::vertex("root")).unwrap();
        model.root_changed(Some(root)).unwrap();
        let group = model.add_child(root, Cell::vertex("group")).unwrap();
        let inner = model.add_child(group, Cell::vertex("inner")).unwrap();
        let outside = model.add_child(root, Cell::vertex("outside")).unwrap();
        let edge = model.add_child(root, Cell::edge("edge")).unwrap();
        model
            .terminal_for_cell_changed(edge, Some(inner), TerminalEnd::Source)
            .unwrap();
        model
            .terminal_for_cell_changed(edge, Some(outside), TerminalEnd::Target)
            .unwrap();

        let removed = model.remove_cell(group).unwrap();

        assert_eq!(removed.len(), 2);
        assert!(removed.contains(&group) && removed.contains(&inner));
        assert!(!model.contains(inner));
        assert_eq!(model.children(root).unwrap(), &[outside, edge]);
        assert_eq!(model.terminal(edge, TerminalEnd::Source).unwrap(), None);
        assert_eq!(model.terminal(edge, TerminalEnd::Target).unwrap(), Some(outside));
        assert_eq!(model.root(), Some(root));
    }

    #[test]
    fn test_removing_root_unsets_it() {
        let mut model = GraphModel::new();
        let root = model.insert_cell(Cell::vertex("root")).unwrap();
        model.root_changed(Some(root)).unwrap();
        model.add_child(root, Cell::vertex("child")).unwrap();

        model.remove_cell(root).unwrap();
        assert_eq!(model.root(), None);
        assert!(model.is_empty());
    }
}
