// UndoableChange trait definition

use crate::model::{CellId, GraphModel, ModelError, TerminalEnd};

/// Result type for change operations
pub type ChangeResult<T> = Result<T, ChangeError>;

/// Errors that can occur while executing or recording changes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangeError {
    /// The model rejected the mutation
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// An edit refers to a cell that has been removed from the model
    #[error("Edit references removed cell {0}")]
    StaleCell(CellId),

    /// Changes can only be appended to an open edit
    #[error("Edit is sealed")]
    Sealed,
}

/// The model field a change writes to
///
/// Two changes with the same slot overwrite each other; changes with
/// different slots commute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSlot {
    Root,
    Style(CellId),
    Visible(CellId),
    Collapsed(CellId),
    Terminal(CellId, TerminalEnd),
    Value(CellId),
}

/// A reversible mutation of the graph model
///
/// # Contract
/// A freshly built change holds the value to apply in both its current and
/// its previous field. `execute()` applies the previous field through the
/// model's primitive mutator, moves it into the current field, and stores
/// whatever the mutator returned as the new previous field. Executing twice
/// therefore restores both the model and the change.
///
/// There is intentionally no `undo()`: callers replay `execute()`.
///
/// # Example
/// ```
/// use diagram_edit::change::{UndoableChange, ValueChange};
/// use diagram_edit::model::{Cell, CellValue, GraphModel};
///
/// let mut model = GraphModel::new();
/// let id = model.insert_cell(Cell::vertex("A")).unwrap();
///
/// let mut change = ValueChange::new(id, "B".into());
/// change.execute(&mut model).unwrap();
/// assert_eq!(model.value(id).unwrap(), &CellValue::from("B"));
///
/// change.execute(&mut model).unwrap();
/// assert_eq!(model.value(id).unwrap(), &CellValue::from("A"));
/// ```
pub trait UndoableChange {
    /// Apply the pending value and remember the one it replaced
    ///
    /// On error nothing has been modified, neither the model nor the change.
    fn execute(&mut self, model: &mut GraphModel) -> ChangeResult<()>;

    /// Human-readable description, e.g. for a history panel
    fn description(&self) -> String;

    /// The model field this change writes to
    fn slot(&self) -> ChangeSlot;

    /// Every cell this change needs in order to be replayed
    ///
    /// Includes cells referenced by the current and previous values, not only
    /// the target cell.
    fn cells(&self) -> Vec<CellId>;
}
