// Edit - ordered, sealable group of changes

use crate::change::{AtomicChange, ChangeError, ChangeResult, UndoableChange};
use crate::model::{CellId, GraphModel};
use chrono::{DateTime, Utc};

/// One undoable user action
///
/// Changes are kept in the order they were made. A change on a slot that is
/// already present is merged into the earlier change, so every model field
/// appears at most once and the changes of an edit commute. That is what makes
/// a single forward replay correct for undo and redo alike: replaying an edit
/// always inverts the previous replay, whichever direction that was.
#[derive(Debug, Clone)]
pub struct Edit {
    description: String,
    created: DateTime<Utc>,
    significant: bool,
    changes: Vec<AtomicChange>,
    sealed: bool,
}

impl Edit {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            created: Utc::now(),
            significant: true,
            changes: Vec::new(),
            sealed: false,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Insignificant edits (selection changes, view state, ...) are undone
    /// and redone together with the next significant edit.
    pub fn is_significant(&self) -> bool {
        self.significant
    }

    pub fn set_significant(&mut self, significant: bool) {
        self.significant = significant;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Freeze the change list. Sealing twice is harmless.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[AtomicChange] {
        &self.changes
    }

    /// Append an already executed change
    ///
    /// # Errors
    /// Returns [`ChangeError::Sealed`] once the edit is sealed.
    pub fn push(&mut self, change: impl Into<AtomicChange>) -> ChangeResult<()> {
        if self.sealed {
            return Err(ChangeError::Sealed);
        }
        let change = change.into();
        let slot = change.slot();
        match self.changes.iter_mut().find(|c| c.slot() == slot) {
            Some(existing) => {
                // same slot, so merge cannot refuse
                let _ = existing.merge(change);
            }
            None => self.changes.push(change),
        }
        Ok(())
    }

    /// Whether replaying this edit needs the given cell
    pub fn references(&self, cell: CellId) -> bool {
        self.changes.iter().any(|c| c.cells().contains(&cell))
    }

    /// Check that every cell the edit touches is still in the model
    pub fn validate(&self, model: &GraphModel) -> ChangeResult<()> {
        for change in &self.changes {
            if let Some(missing) = change.cells().into_iter().find(|id| !model.contains(*id)) {
                return Err(ChangeError::StaleCell(missing));
            }
        }
        Ok(())
    }

    /// Replay every change in forward order
    ///
    /// The edit is validated first, so a stale edit fails without applying
    /// anything.
    pub fn execute(&mut self, model: &mut GraphModel) -> ChangeResult<()> {
        self.validate(model)?;
        for change in &mut self.changes {
            change.execute(model)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{StyleChange, ValueChange, VisibleChange};
    use crate::model::{AppliedStyle, Cell, CellValue};

    fn apply(model: &mut GraphModel, edit: &mut Edit, change: impl Into<AtomicChange>) {
        let mut change = change.into();
        change.execute(model).unwrap();
        edit.push(change).unwrap();
    }

    #[test]
    fn test_new_edit_is_open_and_empty() {
        let edit = Edit::new("Nothing");
        assert!(edit.is_empty());
        assert!(!edit.is_sealed());
        assert!(edit.is_significant());
        assert_eq!(edit.description(), "Nothing");
    }

    #[test]
    fn test_sealed_edit_rejects_changes() {
        let mut edit = Edit::new("Sealed");
        edit.seal();
        let result = edit.push(VisibleChange::new(CellId::new(), false));
        assert_eq!(result, Err(ChangeError::Sealed));
        assert!(edit.is_empty());
    }

    #[test]
    fn test_replay_twice_restores_model() {
        let mut model = GraphModel::new();
        let a = model.insert_cell(Cell::vertex("A")).unwrap();
        let b = model.insert_cell(Cell::vertex("B")).unwrap();
        let mut edit = Edit::new("Restyle");
        apply(&mut model, &mut edit, ValueChange::new(a, "A2".into()));
        apply(&mut model, &mut edit, VisibleChange::new(b, false));
        apply(
            &mut model,
            &mut edit,
            StyleChange::new(a, AppliedStyle::new().with("dashed", "1")),
        );
        edit.seal();

        edit.execute(&mut model).unwrap();
        assert_eq!(model.value(a).unwrap(), &CellValue::from("A"));
        assert!(model.is_visible(b).unwrap());
        assert!(model.style(a).unwrap().is_empty());

        edit.execute(&mut model).unwrap();
        assert_eq!(model.value(a).unwrap(), &CellValue::from("A2"));
        assert!(!model.is_visible(b).unwrap());
        assert_eq!(model.style(a).unwrap().get("dashed"), Some("1"));
    }

    #[test]
    fn test_repeated_slot_is_merged() {
        let mut model = GraphModel::new();
        let a = model.insert_cell(Cell::vertex("A")).unwrap();
        let mut edit = Edit::new("Type label");
        apply(&mut model, &mut edit, ValueChange::new(a, "B".into()));
        apply(&mut model, &mut edit, ValueChange::new(a, "C".into()));
        assert_eq!(edit.len(), 1);

        edit.execute(&mut model).unwrap();
        assert_eq!(model.value(a).unwrap(), &CellValue::from("A"));
        edit.execute(&mut model).unwrap();
        assert_eq!(model.value(a).unwrap(), &CellValue::from("C"));
    }

    #[test]
    fn test_empty_edit_replay_is_noop() {
        let mut model = GraphModel::new();
        let a = model.insert_cell(Cell::vertex("A")).unwrap();
        let mut edit = Edit::new("Empty");
        edit.execute(&mut model).unwrap();
        assert_eq!(model.value(a).unwrap(), &CellValue::from("A"));
    }

    #[test]
    fn test_stale_edit_applies_nothing() {
        let mut model = GraphModel::new();
        let a = model.insert_cell(Cell::vertex("A")).unwrap();
        let b = model.insert_cell(Cell::vertex("B")).unwrap();
        let mut edit = Edit::new("Two cells");
        apply(&mut model, &mut edit, ValueChange::new(a, "A2".into()));
        apply(&mut model, &mut edit, ValueChange::new(b, "B2".into()));

        model.remove_cell(b).unwrap();
        assert!(edit.references(b));
        assert_eq!(edit.execute(&mut model), Err(ChangeError::StaleCell(b)));
        assert_eq!(model.value(a).unwrap(), &CellValue::from("A2"));
    }
}
