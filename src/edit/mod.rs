// Edits - atomic groups of changes
//
// An Edit is the record of one user action. While a Transaction is open,
// every change is executed immediately and appended to the edit; committing
// seals it so it can be handed to the UndoManager.

pub mod atomic_edit;
pub mod transaction;

pub use atomic_edit::Edit;
pub use transaction::Transaction;
