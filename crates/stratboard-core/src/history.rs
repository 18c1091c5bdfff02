//! Snapshot-based undo/redo history.

use crate::elements::Element;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// A full value copy of an element collection.
pub type Snapshot = Vec<Element>;

/// Batching state of the history.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Transaction {
    /// Every mutating edit records its own undo step.
    #[default]
    Idle,
    /// Edits are collapsed into one step covering `snapshot`, the state
    /// before the batch started.
    Open { snapshot: Snapshot },
}

/// Undo (`past`) and redo (`future`) stacks plus the open transaction.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
    transaction: Transaction,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state before a new edit and drop the redo stack.
    ///
    /// A snapshot equal to the current top of `past` is not pushed again.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.future.clear();
        if self.past.last() == Some(&snapshot) {
            return;
        }
        self.past.push(snapshot);
        if self.past.len() > MAX_UNDO_HISTORY {
            self.past.remove(0);
        }
    }

    /// Record `current` as an edit unless a batch is open.
    pub fn record_edit(&mut self, current: &[Element]) {
        if !self.in_batch() {
            self.record(current.to_vec());
        }
    }

    /// Step back: returns the state to adopt, storing `current` for redo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward: returns the state to adopt, storing `current` for undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    /// Open a batch. A second call before [`History::end_batch`] replaces
    /// the captured snapshot.
    pub fn start_batch(&mut self, current: &[Element]) {
        self.transaction = Transaction::Open {
            snapshot: current.to_vec(),
        };
    }

    /// Close the open batch as one undo step. No-op without an open batch.
    pub fn end_batch(&mut self) {
        if let Transaction::Open { snapshot } = std::mem::take(&mut self.transaction) {
            self.record(snapshot);
        }
    }

    pub fn in_batch(&self) -> bool {
        matches!(self.transaction, Transaction::Open { .. })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Drop both stacks and abandon any open batch.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.transaction = Transaction::Idle;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    /// Oldest-first view of the undo stack.
    pub fn past(&self) -> &[Snapshot] {
        &self.past
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Line;

    fn snap(n: usize) -> Snapshot {
        (0..n)
            .map(|i| Element::Line(Line::new(format!("line-{i}"), vec![i as f64, 0.0])))
            .collect()
    }

    #[test]
    fn test_bounded_to_most_recent() {
        let mut history = History::new();
        for n in 0..60 {
            history.record(snap(n));
        }
        assert_eq!(history.undo_len(), MAX_UNDO_HISTORY);
        assert_eq!(history.past()[0], snap(10));
        assert_eq!(history.past().last(), Some(&snap(59)));
    }

    #[test]
    fn test_duplicate_top_is_not_pushed() {
        let mut history = History::new();
        history.record(snap(2));
        history.record(snap(2));
        assert_eq!(history.undo_len(), 1);
        history.record(snap(1));
        history.record(snap(2));
        assert_eq!(history.undo_len(), 3);
    }

    #[test]
    fn test_undo_redo_swap_states() {
        let mut history = History::new();
        history.record(snap(0));
        let previous = history.undo(snap(1)).unwrap();
        assert_eq!(previous, snap(0));
        assert!(history.can_redo());
        let next = history.redo(previous).unwrap();
        assert_eq!(next, snap(1));
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = History::new();
        assert!(history.undo(snap(1)).is_none());
        assert!(history.redo(snap(1)).is_none());
        assert_eq!((history.undo_len(), history.redo_len()), (0, 0));
    }

    #[test]
    fn test_batch_records_once() {
        let mut history = History::new();
        history.start_batch(&snap(0));
        history.record_edit(&snap(1));
        history.record_edit(&snap(2));
        assert_eq!(history.undo_len(), 0);
        history.end_batch();
        assert_eq!(history.past(), &[snap(0)]);
        assert_eq!(history.transaction(), &Transaction::Idle);
    }

    #[test]
    fn test_second_start_overwrites_snapshot() {
        let mut history = History::new();
        history.start_batch(&snap(0));
        history.start_batch(&snap(3));
        history.end_batch();
        assert_eq!(history.past(), &[snap(3)]);
    }

    #[test]
    fn test_end_without_batch_is_noop() {
        let mut history = History::new();
        history.record(snap(0));
        let _ = history.undo(snap(1));
        history.end_batch();
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn test_new_edit_clears_future() {
        let mut history = History::new();
        history.record(snap(0));
        let _ = history.undo(snap(1));
        history.record_edit(&snap(0));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_clear_abandons_open_batch() {
        let mut history = History::new();
        history.record(snap(0));
        history.start_batch(&snap(1));
        history.clear();
        assert!(!history.in_batch());
        history.end_batch();
        assert!(!history.can_undo());
    }
}
