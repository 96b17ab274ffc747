//! Transaction frames and the frame stack.

use crate::transaction::undo::UndoRecord;

/// Undo records for one open transaction, in the order the mutations
/// happened while this frame was innermost.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionFrame {
    records: Vec<UndoRecord>,
}

impl TransactionFrame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: UndoRecord) {
        self.records.push(record);
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was mutated while this frame was innermost.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the frame, yielding records most-recent-first.
    pub fn into_replay_order(self) -> impl Iterator<Item = UndoRecord> {
        self.records.into_iter().rev()
    }
}

/// Stack of open transaction frames.
///
/// The stack depth is the current nesting level; 0 means no transaction is
/// open and mutations are not recorded.
#[derive(Debug, Default, Clone)]
pub struct TransactionLog {
    frames: Vec<TransactionFrame>,
}

impl TransactionLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new innermost frame.
    pub fn begin(&mut self) {
        self.frames.push(TransactionFrame::new());
    }

    /// Appends `record` to the innermost frame.
    ///
    /// Returns false, dropping the record, when no transaction is open.
    pub fn record(&mut self, record: UndoRecord) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.push(record);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the innermost frame.
    pub fn pop(&mut self) -> Option<TransactionFrame> {
        self.frames.pop()
    }

    /// Discards every frame, returning how many were open.
    pub fn clear(&mut self) -> usize {
        let discarded = self.frames.len();
        self.frames.clear();
        discarded
    }

    /// Returns the nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Returns the innermost frame.
    #[must_use]
    pub fn innermost(&self) -> Option<&TransactionFrame> {
        self.frames.last()
    }

    /// Returns the total number of undo records across all frames.
    #[must_use]
    pub fn pending_records(&self) -> usize {
        self.frames.iter().map(TransactionFrame::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Key, Value};

    fn set_record(key: &str, prior: Option<&str>) -> UndoRecord {
        UndoRecord::Set {
            key: Key::from(key),
            prior: prior.map(|p| Value::new(p).unwrap()),
        }
    }

    #[test]
    fn record_without_frame_is_dropped() {
        let mut log = TransactionLog::new();
        assert!(!log.record(set_record("a", None)));
        assert_eq!(log.depth(), 0);
        assert_eq!(log.pending_records(), 0);
    }

    #[test]
    fn records_go_to_innermost_frame() {
        let mut log = TransactionLog::new();
        log.begin();
        log.record(set_record("a", None));
        log.begin();
        log.record(set_record("b", None));
        log.record(set_record("c", None));

        assert_eq!(log.depth(), 2);
        assert_eq!(log.innermost().map(TransactionFrame::len), Some(2));
        assert_eq!(log.pending_records(), 3);

        let inner = log.pop().unwrap();
        assert_eq!(inner.len(), 2);
        assert_eq!(log.innermost().map(TransactionFrame::len), Some(1));
    }

    #[test]
    fn replay_order_is_reversed() {
        let mut frame = TransactionFrame::new();
        frame.push(set_record("a", None));
        frame.push(set_record("a", Some("foo")));

        let keys: Vec<_> = frame
            .into_replay_order()
            .map(|r| r.restores_to().cloned())
            .collect();
        assert_eq!(keys, vec![Some(Value::new("foo").unwrap()), None]);
    }

    #[test]
    fn clear_reports_discarded_frames() {
        let mut log = TransactionLog::new();
        assert_eq!(log.clear(), 0);

        log.begin();
        log.begin();
        log.begin();
        assert_eq!(log.clear(), 3);
        assert!(!log.is_active());
        assert!(log.pop().is_none());
    }
}
