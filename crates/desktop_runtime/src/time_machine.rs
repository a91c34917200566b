//! Bounded layout history used for scrub-to-restore.

use std::collections::VecDeque;

use crate::model::{DesktopState, Snapshot};

/// Oldest-evicted-first ring of [`Snapshot`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHistory {
    capacity: usize,
    entries: VecDeque<Snapshot>,
}

impl SnapshotHistory {
    /// Creates an empty history. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Rebuilds a history from persisted entries, keeping only the newest `capacity` of them.
    pub fn from_entries(capacity: usize, entries: Vec<Snapshot>) -> Self {
        let mut history = Self::new(capacity);
        for snapshot in entries {
            history.push(snapshot);
        }
        history
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Index 0 is the oldest retained capture.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> Vec<Snapshot> {
        self.entries.iter().cloned().collect()
    }

    /// Capture timestamps, oldest first.
    pub fn timestamps(&self) -> Vec<u64> {
        self.entries.iter().map(|s| s.timestamp_ms).collect()
    }
}

/// Deep-copies the window collection and active id of `state`.
pub fn capture(state: &DesktopState, timestamp_ms: u64) -> Snapshot {
    Snapshot {
        timestamp_ms,
        windows: state.windows().to_vec(),
        active_window_id: state.active_window_id(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn empty_at(timestamp_ms: u64) -> Snapshot {
        Snapshot {
            timestamp_ms,
            windows: Vec::new(),
            active_window_id: None,
        }
    }

    #[test]
    fn thirteenth_capture_evicts_oldest() {
        let mut history = SnapshotHistory::new(12);
        for ts in 0..13 {
            history.push(empty_at(ts));
        }

        assert_eq!(history.len(), 12);
        assert_eq!(history.get(0).map(|s| s.timestamp_ms), Some(1));
        assert_eq!(history.get(11).map(|s| s.timestamp_ms), Some(12));
        assert_eq!(history.get(12), None);
    }

    #[test]
    fn from_entries_keeps_newest() {
        let history = SnapshotHistory::from_entries(2, (0..5).map(empty_at).collect());

        assert_eq!(history.timestamps(), vec![3, 4]);
    }
}
