#![forbid(unsafe_code)]

//! Bounded playback history for stepping backward.
//!
//! [`PlaybackHistory`] keeps the most recently applied events of a run so
//! the presentation can be rewound. Rewinding is presentation-only: the
//! trace that produced the events keeps its position, and resuming forward
//! continues from wherever the algorithm actually is.
//!
//! # Invariants
//!
//! 1. `len() <= capacity()` after any operation
//! 2. Entries are in application order (oldest at front)
//! 3. `rewind` never empties the history
//!
//! ```text
//! push(e5), capacity 4
//! ┌──────────────────────────────┐
//! │ [e2, e3, e4, e5]             │   e1 evicted
//! └──────────────────────────────┘
//!
//! rewind()
//! ┌──────────────────────────────┐
//! │ [e2, e3, e4]                 │   display restored to e4
//! └──────────────────────────────┘
//!
//! push(e6)
//! ┌──────────────────────────────┐
//! │ [e2, e3, e4, e6]             │
//! └──────────────────────────────┘
//! ```

use std::collections::VecDeque;

use sortviz_core::StepEvent;

/// Capped, append-only (except for rewinds) event log for one run.
#[derive(Debug, Clone)]
pub struct PlaybackHistory {
    entries: VecDeque<StepEvent>,
    capacity: usize,
}

impl Default for PlaybackHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PlaybackHistory {
    /// Create a history holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append an applied event, evicting the oldest entry when full.
    pub fn push(&mut self, event: StepEvent) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Drop the newest entry and return the one that is now newest.
    ///
    /// Returns `None` (and leaves the history untouched) unless there are
    /// at least two entries.
    pub fn rewind(&mut self) -> Option<&StepEvent> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop_back();
        self.entries.back()
    }

    #[must_use]
    pub fn can_rewind(&self) -> bool {
        self.entries.len() > 1
    }

    #[must_use]
    pub fn last(&self) -> Option<&StepEvent> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepEvent> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_core::{StepKind, elements_from_values};

    fn event(idx: usize) -> StepEvent {
        StepEvent::new(
            StepKind::Compare,
            vec![idx, idx + 1],
            elements_from_values(&[1, 2, 3]).into(),
        )
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut history = PlaybackHistory::new(3);
        for i in 0..5 {
            history.push(event(i));
        }
        assert_eq!(history.len(), 3);
        let firsts: Vec<_> = history.iter().map(|e| e.indices[0]).collect();
        assert_eq!(firsts, vec![2, 3, 4]);
    }

    #[test]
    fn rewind_returns_new_last() {
        let mut history = PlaybackHistory::new(10);
        history.push(event(0));
        history.push(event(1));
        history.push(event(2));
        assert_eq!(history.rewind().map(|e| e.indices[0]), Some(1));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn rewind_refuses_single_entry() {
        let mut history = PlaybackHistory::new(10);
        assert!(history.rewind().is_none());
        history.push(event(0));
        assert!(!history.can_rewind());
        assert!(history.rewind().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn push_after_rewind_truncates_branch() {
        let mut history = PlaybackHistory::new(10);
        for i in 0..3 {
            history.push(event(i));
        }
        history.rewind();
        history.push(event(9));
        let firsts: Vec<_> = history.iter().map(|e| e.indices[0]).collect();
        assert_eq!(firsts, vec![0, 1, 9]);
    }

    #[test]
    fn zero_capacity_clamped() {
        let mut history = PlaybackHistory::new(0);
        history.push(event(0));
        history.push(event(1));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.last().map(|e| e.indices[0]), Some(1));
    }

    #[test]
    fn clear_empties() {
        let mut history = PlaybackHistory::default();
        history.push(event(0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 100);
    }
}
