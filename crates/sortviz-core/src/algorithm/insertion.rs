//! Insertion sort.

use super::{Algorithm, SortTrace, Workspace};
use crate::element::Element;
use crate::event::StepEvent;

const LINE_COMPARE: u32 = 7;
const LINE_SHIFT: u32 = 9;
const LINE_FINALIZE: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Compare,
    Shift,
    SettlePrefix,
    SettleAll,
    Done,
}

/// Grows a sorted prefix one element at a time.
///
/// The key is walked left by adjacent swaps, one `Exchange` per shift, so
/// every snapshot is a permutation of the input. After each insertion the
/// whole prefix `0..=i` is reported as finalized; a last event covers every
/// index once the outer loop ends.
#[derive(Debug, Clone)]
pub struct InsertionSort {
    ws: Workspace,
    i: usize,
    /// Current position of the key being inserted.
    key_pos: usize,
    phase: Phase,
}

impl InsertionSort {
    #[must_use]
    pub fn new(input: &[Element]) -> Self {
        let phase = match input.len() {
            0 => Phase::Done,
            1 => Phase::SettleAll,
            _ => Phase::Compare,
        };
        Self {
            ws: Workspace::new(input),
            i: 1,
            key_pos: 1,
            phase,
        }
    }

    /// Whether the key must move one more slot to the left.
    fn predecessor_greater(&self) -> bool {
        self.key_pos > 0 && self.ws.value(self.key_pos - 1) > self.ws.value(self.key_pos)
    }
}

impl Iterator for InsertionSort {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Compare => {
                    self.key_pos = self.i;
                    self.phase = Phase::Shift;
                    let event = self.ws.compare(self.i - 1, self.i);
                    return Some(event.with_source_line(Some(LINE_COMPARE)));
                }
                Phase::Shift => {
                    if !self.predecessor_greater() {
                        self.phase = Phase::SettlePrefix;
                        continue;
                    }
                    let at = self.key_pos - 1;
                    self.key_pos = at;
                    let event = self.ws.exchange(at, at + 1);
                    return Some(event.with_source_line(Some(LINE_SHIFT)));
                }
                Phase::SettlePrefix => {
                    let prefix: Vec<usize> = (0..=self.i).collect();
                    self.i += 1;
                    self.phase = if self.i < self.ws.len() {
                        Phase::Compare
                    } else {
                        Phase::SettleAll
                    };
                    let event = self.ws.finalize(prefix);
                    return Some(event.with_source_line(Some(LINE_FINALIZE)));
                }
                Phase::SettleAll => {
                    self.phase = Phase::Done;
                    return Some(self.ws.finalize((0..self.ws.len()).collect()));
                }
            }
        }
    }
}

impl SortTrace for InsertionSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Insertion
    }

    fn working(&self) -> &[Element] {
        self.ws.as_slice()
    }
}
