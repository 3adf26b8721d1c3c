// Notification payloads for rendering and UI collaborators

use crate::change::AtomicChange;

/// Emitted by the graph model
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// A transaction was opened
    BeginUpdate { description: String },
    /// A change was executed. Carries the change itself so listeners can read
    /// the cell, the applied value and the value it replaced.
    Changed(AtomicChange),
    /// A transaction was committed or rolled back
    EndUpdate,
}

/// What happened to the undo/redo stacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEventKind {
    Added { description: String },
    Undone { description: String },
    Redone { description: String },
    Cleared,
    /// Oldest entries evicted by the history limit
    Trimmed { count: usize },
    /// Entries dropped because they referenced removed cells
    Purged { count: usize },
}

/// Emitted by the undo manager after every stack transition
///
/// `can_undo` / `can_redo` reflect the stacks after the transition, which is
/// all a toolbar needs to refresh its buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    pub kind: HistoryEventKind,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::channels::create_history_event_channel;
    use ringbuf::traits::{Consumer, Producer};

    #[test]
    fn test_history_channel_delivers_in_order() {
        let (mut tx, mut rx) = create_history_event_channel(4);
        for kind in [HistoryEventKind::Cleared, HistoryEventKind::Trimmed { count: 2 }] {
            tx.try_push(HistoryEvent {
                kind,
                can_undo: false,
                can_redo: false,
            })
            .unwrap();
        }

        assert_eq!(rx.try_pop().unwrap().kind, HistoryEventKind::Cleared);
        assert_eq!(
            rx.try_pop().unwrap().kind,
            HistoryEventKind::Trimmed { count: 2 }
        );
        assert!(rx.try_pop().is_none());
    }

    #[test]
    fn test_full_channel_rejects_push() {
        let (mut tx, _rx) = create_history_event_channel(1);
        let event = HistoryEvent {
            kind: HistoryEventKind::Cleared,
            can_undo: false,
            can_redo: false,
        };
        assert!(tx.try_push(event.clone()).is_ok());
        assert!(tx.try_push(event).is_err());
    }
}
