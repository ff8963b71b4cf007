//! Linear undo/redo history of whole-scene snapshots.

use crate::scene::Snapshot;

/// Ordered snapshots with a cursor at the one currently shown.
///
/// Pushing after an undo discards everything past the cursor, so history
/// never branches.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
    position: usize,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` snapshots, dropping the oldest. A limit of zero
    /// is treated as one.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::default()
        }
    }

    /// Record `snapshot` as the newest state.
    pub fn push(&mut self, snapshot: Snapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.position + 1);
        }
        self.entries.push(snapshot);
        if let Some(limit) = self.limit {
            let excess = self.entries.len().saturating_sub(limit);
            if excess > 0 {
                self.entries.drain(..excess);
                log::debug!("history limit reached, dropped {excess} snapshot(s)");
            }
        }
        self.position = self.entries.len() - 1;
    }

    /// Step back and return the snapshot to reload.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.position -= 1;
        self.entries.get(self.position)
    }

    /// Step forward and return the snapshot to reload.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.position += 1;
        self.entries.get(self.position)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.position)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(s: &str) -> Snapshot {
        Snapshot::from(s.to_string())
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        history.push(snap("a"));
        history.push(snap("b"));
        history.push(snap("c"));
        assert_eq!(history.position(), 2);

        assert_eq!(history.undo().map(Snapshot::as_str), Some("b"));
        assert_eq!(history.undo().map(Snapshot::as_str), Some("a"));
        assert!(history.undo().is_none());
        assert_eq!(history.position(), 0);

        assert_eq!(history.redo().map(Snapshot::as_str), Some("b"));
        assert_eq!(history.redo().map(Snapshot::as_str), Some("c"));
        assert!(history.redo().is_none());
        assert_eq!(history.current().map(Snapshot::as_str), Some("c"));
    }

    #[test]
    fn test_push_after_undo_discards_redo() {
        let mut history = History::new();
        for s in ["a", "b", "c", "d"] {
            history.push(snap(s));
        }
        history.undo();
        history.undo();
        assert!(history.can_redo());

        history.push(snap("x"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo().map(Snapshot::as_str), Some("b"));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(3));
        for s in ["a", "b", "c", "d", "e"] {
            history.push(snap(s));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.position(), 2);
        history.undo();
        assert_eq!(history.undo().map(Snapshot::as_str), Some("c"));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push(snap("a"));
        history.push(snap("b"));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.position(), 0);
        assert!(!history.can_undo());
    }
}
