// Transaction - begin / append / seal an Edit around model mutations

use crate::change::{
    AtomicChange, ChangeResult, CollapseChange, RootChange, StyleChange, TerminalChange,
    UndoableChange, ValueChange, VisibleChange,
};
use crate::edit::Edit;
use crate::messaging::event::ModelEvent;
use crate::model::{AppliedStyle, CellId, CellValue, GraphModel, TerminalEnd};

/// An open edit bound to the model it records
///
/// Created by [`GraphModel::begin_update`]. Each setter builds the matching
/// change, executes it right away and appends it to the edit. Call
/// [`Transaction::commit`] to seal the edit; a transaction that is dropped
/// without being committed reverts everything it applied.
///
/// # Example
/// ```
/// use diagram_edit::history::UndoManager;
/// use diagram_edit::model::{Cell, CellValue, GraphModel};
///
/// let mut model = GraphModel::new();
/// let mut history = UndoManager::new();
/// let id = model.insert_cell(Cell::vertex("A")).unwrap();
///
/// let mut tx = model.begin_update("Rename");
/// tx.set_value(id, "B").unwrap();
/// if let Some(edit) = tx.commit() {
///     history.record(edit);
/// }
///
/// history.undo(&mut model).unwrap();
/// assert_eq!(model.value(id).unwrap(), &CellValue::from("A"));
/// ```
pub struct Transaction<'a> {
    model: &'a mut GraphModel,
    edit: Option<Edit>,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(model: &'a mut GraphModel, description: String) -> Self {
        model.publish(ModelEvent::BeginUpdate {
            description: description.clone(),
        });
        Self {
            model,
            edit: Some(Edit::new(description)),
        }
    }

    /// Read access to the model while the transaction is open
    pub fn model(&self) -> &GraphModel {
        &*self.model
    }

    pub fn set_root(&mut self, root: Option<CellId>) -> ChangeResult<()> {
        self.apply(RootChange::new(root))
    }

    pub fn set_style(&mut self, cell: CellId, style: AppliedStyle) -> ChangeResult<()> {
        self.apply(StyleChange::new(cell, style))
    }

    pub fn set_visible(&mut self, cell: CellId, visible: bool) -> ChangeResult<()> {
        self.apply(VisibleChange::new(cell, visible))
    }

    pub fn set_collapsed(&mut self, cell: CellId, collapsed: bool) -> ChangeResult<()> {
        self.apply(CollapseChange::new(cell, collapsed))
    }

    pub fn set_terminal(
        &mut self,
        edge: CellId,
        terminal: Option<CellId>,
        end: TerminalEnd,
    ) -> ChangeResult<()> {
        self.apply(TerminalChange::new(edge, terminal, end))
    }

    pub fn set_value(&mut self, cell: CellId, value: impl Into<CellValue>) -> ChangeResult<()> {
        self.apply(ValueChange::new(cell, value.into()))
    }

    /// Execute an arbitrary change and record it
    pub fn apply(&mut self, change: impl Into<AtomicChange>) -> ChangeResult<()> {
        let mut change = change.into();
        change.execute(self.model)?;
        if let Some(edit) = self.edit.as_mut() {
            edit.push(change)?;
        }
        Ok(())
    }

    pub fn set_significant(&mut self, significant: bool) {
        if let Some(edit) = self.edit.as_mut() {
            edit.set_significant(significant);
        }
    }

    /// Number of distinct model fields changed so far
    pub fn len(&self) -> usize {
        self.edit.as_ref().map_or(0, Edit::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seal and return the edit, or `None` if nothing was changed
    pub fn commit(mut self) -> Option<Edit> {
        let mut edit = self.edit.take()?;
        self.model.publish(ModelEvent::EndUpdate);
        if edit.is_empty() {
            return None;
        }
        edit.seal();
        log::debug!("Committed edit '{}' ({} changes)", edit.description(), edit.len());
        Some(edit)
    }

    /// Revert every change made through this transaction
    pub fn rollback(mut self) {
        self.revert();
    }

    fn revert(&mut self) {
        let Some(mut edit) = self.edit.take() else {
            return;
        };
        if !edit.is_empty() {
            log::debug!("Rolling back edit '{}'", edit.description());
            if let Err(e) = edit.execute(self.model) {
                log::warn!("Rollback of '{}' failed: {}", edit.description(), e);
            }
        }
        self.model.publish(ModelEvent::EndUpdate);
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        self.revert();
    }
}
