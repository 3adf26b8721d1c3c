// Concrete change implementations

use crate::change::trait_def::{ChangeResult, ChangeSlot, UndoableChange};
use crate::model::{AppliedStyle, CellId, CellValue, GraphModel, TerminalEnd};

/// Change of the model root
///
/// Swapping the root replaces the whole visible tree in one step (e.g. when
/// switching diagram pages).
#[derive(Debug, Clone, PartialEq)]
pub struct RootChange {
    root: Option<CellId>,
    previous: Option<CellId>,
}

impl RootChange {
    pub fn new(root: Option<CellId>) -> Self {
        Self {
            root,
            previous: root,
        }
    }

    pub fn value(&self) -> Option<CellId> {
        self.root
    }

    pub fn previous(&self) -> Option<CellId> {
        self.previous
    }
}

impl UndoableChange for RootChange {
    fn execute(&mut self, model: &mut GraphModel) -> ChangeResult<()> {
        let replaced = model.root_changed(self.previous)?;
        self.root = std::mem::replace(&mut self.previous, replaced);
        model.notify_change(|| self.clone().into());
        Ok(())
    }

    fn description(&self) -> String {
        match self.root {
            Some(root) => format!("Set root to {}", root),
            None => "Clear root".to_string(),
        }
    }

    fn slot(&self) -> ChangeSlot {
        ChangeSlot::Root
    }

    fn cells(&self) -> Vec<CellId> {
        self.root.into_iter().chain(self.previous).collect()
    }
}

/// Change of the style of a cell
#[derive(Debug, Clone, PartialEq)]
pub struct StyleChange {
    cell: CellId,
    style: AppliedStyle,
    previous: AppliedStyle,
}

impl StyleChange {
    pub fn new(cell: CellId, style: AppliedStyle) -> Self {
        Self {
            cell,
            previous: style.clone(),
            style,
        }
    }

    pub fn cell(&self) -> CellId {
        self.cell
    }

    pub fn value(&self) -> &AppliedStyle {
        &self.style
    }

    pub fn previous(&self) -> &AppliedStyle {
        &self.previous
    }
}

impl UndoableChange for StyleChange {
    fn execute(&mut self, model: &mut GraphModel) -> ChangeResult<()> {
        let replaced = model.style_for_cell_changed(self.cell, self.previous.clone())?;
        self.style = std::mem::replace(&mut self.previous, replaced);
        model.notify_change(|| self.clone().into());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Set style of {} to '{}'", self.cell, self.style)
    }

    fn slot(&self) -> ChangeSlot {
        ChangeSlot::Style(self.cell)
    }

    fn cells(&self) -> Vec<CellId> {
        vec![self.cell]
    }
}

/// Show or hide a cell
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleChange {
    cell: CellId,
    visible: bool,
    previous: bool,
}

impl VisibleChange {
    pub fn new(cell: CellId, visible: bool) -> Self {
        Self {
            cell,
            visible,
            previous: visible,
        }
    }

    pub fn cell(&self) -> CellId {
        self.cell
    }

    pub fn value(&self) -> bool {
        self.visible
    }

    pub fn previous(&self) -> bool {
        self.previous
    }
}

impl UndoableChange for VisibleChange {
    fn execute(&mut self, model: &mut GraphModel) -> ChangeResult<()> {
        let replaced = model.visible_state_for_cell_changed(self.cell, self.previous)?;
        self.visible = std::mem::replace(&mut self.previous, replaced);
        model.notify_change(|| self.clone().into());
        Ok(())
    }

    fn description(&self) -> String {
        if self.visible {
            format!("Show {}", self.cell)
        } else {
            format!("Hide {}", self.cell)
        }
    }

    fn slot(&self) -> ChangeSlot {
        ChangeSlot::Visible(self.cell)
    }

    fn cells(&self) -> Vec<CellId> {
        vec![self.cell]
    }
}

/// Fold or unfold a group cell
#[derive(Debug, Clone, PartialEq)]
pub struct CollapseChange {
    cell: CellId,
    collapsed: bool,
    previous: bool,
}

impl CollapseChange {
    pub fn new(cell: CellId, collapsed: bool) -> Self {
        Self {
            cell,
            collapsed,
            previous: collapsed,
        }
    }

    pub fn cell(&self) -> CellId {
        self.cell
    }

    pub fn value(&self) -> bool {
        self.collapsed
    }

    pub fn previous(&self) -> bool {
        self.previous
    }
}

impl UndoableChange for CollapseChange {
    fn execute(&mut self, model: &mut GraphModel) -> ChangeResult<()> {
        let replaced = model.collapsed_state_for_cell_changed(self.cell, self.previous)?;
        self.collapsed = std::mem::replace(&mut self.previous, replaced);
        model.notify_change(|| self.clone().into());
        Ok(())
    }

    fn description(&self) -> String {
        if self.collapsed {
            format!("Collapse {}", self.cell)
        } else {
            format!("Expand {}", self.cell)
        }
    }

    fn slot(&self) -> ChangeSlot {
        ChangeSlot::Collapsed(self.cell)
    }

    fn cells(&self) -> Vec<CellId> {
        vec![self.cell]
    }
}

/// Connect or disconnect one end of an edge
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalChange {
    cell: CellId,
    terminal: Option<CellId>,
    previous: Option<CellId>,
    end: TerminalEnd,
}

impl TerminalChange {
    pub fn new(cell: CellId, terminal: Option<CellId>, end: TerminalEnd) -> Self {
        Self {
            cell,
            terminal,
            previous: terminal,
            end,
        }
    }

    pub fn cell(&self) -> CellId {
        self.cell
    }

    pub fn end(&self) -> TerminalEnd {
        self.end
    }

    pub fn value(&self) -> Option<CellId> {
        self.terminal
    }

    pub fn previous(&self) -> Option<CellId> {
        self.previous
    }
}

impl UndoableChange for TerminalChange {
    fn execute(&mut self, model: &mut GraphModel) -> ChangeResult<()> {
        let replaced = model.terminal_for_cell_changed(self.cell, self.previous, self.end)?;
        self.terminal = std::mem::replace(&mut self.previous, replaced);
        model.notify_change(|| self.clone().into());
        Ok(())
    }

    fn description(&self) -> String {
        match self.terminal {
            Some(terminal) => format!("Connect {:?} of {} to {}", self.end, self.cell, terminal),
            None => format!("Disconnect {:?} of {}", self.end, self.cell),
        }
    }

    fn slot(&self) -> ChangeSlot {
        ChangeSlot::Terminal(self.cell, self.end)
    }

    fn cells(&self) -> Vec<CellId> {
        std::iter::once(self.cell)
            .chain(self.terminal)
            .chain(self.previous)
            .collect()
    }
}

/// Change of the user value of a cell
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    cell: CellId,
    value: CellValue,
    previous: CellValue,
}

impl ValueChange {
    pub fn new(cell: CellId, value: CellValue) -> Self {
        Self {
            cell,
            previous: value.clone(),
            value,
        }
    }

    pub fn cell(&self) -> CellId {
        self.cell
    }

    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub fn previous(&self) -> &CellValue {
        &self.previous
    }
}

impl UndoableChange for ValueChange {
    fn execute(&mut self, model: &mut GraphModel) -> ChangeResult<()> {
        let replaced = model.value_for_cell_changed(self.cell, self.previous.clone())?;
        self.value = std::mem::replace(&mut self.previous, replaced);
        model.notify_change(|| self.clone().into());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Set value of {} to {}", self.cell, self.value)
    }

    fn slot(&self) -> ChangeSlot {
        ChangeSlot::Value(self.cell)
    }

    fn cells(&self) -> Vec<CellId> {
        vec![self.cell]
    }
}

/// Any of the six changes, as stored in an [`Edit`](crate::edit::Edit)
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicChange {
    Root(RootChange),
    Style(StyleChange),
    Visible(VisibleChange),
    Collapse(CollapseChange),
    Terminal(TerminalChange),
    Value(ValueChange),
}

impl AtomicChange {
    fn as_change(&self) -> &dyn UndoableChange {
        match self {
            AtomicChange::Root(c) => c,
            AtomicChange::Style(c) => c,
            AtomicChange::Visible(c) => c,
            AtomicChange::Collapse(c) => c,
            AtomicChange::Terminal(c) => c,
            AtomicChange::Value(c) => c,
        }
    }

    fn as_change_mut(&mut self) -> &mut dyn UndoableChange {
        match self {
            AtomicChange::Root(c) => c,
            AtomicChange::Style(c) => c,
            AtomicChange::Visible(c) => c,
            AtomicChange::Collapse(c) => c,
            AtomicChange::Terminal(c) => c,
            AtomicChange::Value(c) => c,
        }
    }

    /// Fold a later, already executed change on the same slot into this one
    ///
    /// The merged change keeps this change's `previous` and takes the later
    /// change's applied value, so executing it once undoes both. Returns the
    /// later change untouched if the slots differ.
    pub fn merge(&mut self, later: AtomicChange) -> Result<(), AtomicChange> {
        if self.slot() != later.slot() {
            return Err(later);
        }
        match (self, later) {
            (AtomicChange::Root(a), AtomicChange::Root(b)) => a.root = b.root,
            (AtomicChange::Style(a), AtomicChange::Style(b)) => a.style = b.style,
            (AtomicChange::Visible(a), AtomicChange::Visible(b)) => a.visible = b.visible,
            (AtomicChange::Collapse(a), AtomicChange::Collapse(b)) => a.collapsed = b.collapsed,
            (AtomicChange::Terminal(a), AtomicChange::Terminal(b)) => a.terminal = b.terminal,
            (AtomicChange::Value(a), AtomicChange::Value(b)) => a.value = b.value,
            (_, later) => return Err(later),
        }
        Ok(())
    }
}

impl UndoableChange for AtomicChange {
    fn execute(&mut self, model: &mut GraphModel) -> ChangeResult<()> {
        self.as_change_mut().execute(model)
    }

    fn description(&self) -> String {
        self.as_change().description()
    }

    fn slot(&self) -> ChangeSlot {
        self.as_change().slot()
    }

    fn cells(&self) -> Vec<CellId> {
        self.as_change().cells()
    }
}

macro_rules! impl_from_change {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for AtomicChange {
                fn from(change: $ty) -> Self {
                    AtomicChange::$variant(change)
                }
            }
        )*
    };
}

impl_from_change!(
    Root(RootChange),
    Style(StyleChange),
    Visible(VisibleChange),
    Collapse(CollapseChange),
    Terminal(TerminalChange),
    Value(ValueChange),
);
