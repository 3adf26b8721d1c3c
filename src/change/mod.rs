// Self-inverting changes
//
// Every change pairs one primitive mutator of GraphModel with the value to
// hand it. A change has a single `execute()`: running it applies the stored
// value and keeps the value it replaced, so running it again puts everything
// back. The same object serves as both the "do" and the "undo" of a mutation.
//
// Architecture:
// - UndoableChange trait: execute(), description(), slot(), cells()
// - Six concrete changes: RootChange, StyleChange, VisibleChange,
//   CollapseChange, TerminalChange, ValueChange
// - AtomicChange: flat sum type stored in edits and sent to listeners

pub mod changes;
pub mod trait_def;

pub use changes::{
    AtomicChange, CollapseChange, RootChange, StyleChange, TerminalChange, ValueChange,
    VisibleChange,
};
pub use trait_def::{ChangeError, ChangeResult, ChangeSlot, UndoableChange};
