//! Selection sort.

use super::{Algorithm, SortTrace, Workspace};
use crate::element::Element;
use crate::event::StepEvent;

const LINE_COMPARE: u32 = 6;
const LINE_EXCHANGE: u32 = 9;
const LINE_FINALIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scan,
    Exchange,
    Finalize,
    Done,
}

/// Each pass scans the unsorted suffix for its minimum and swaps it into
/// place. The swap is emitted even when the minimum is already in place.
#[derive(Debug, Clone)]
pub struct SelectionSort {
    ws: Workspace,
    i: usize,
    j: usize,
    min_idx: usize,
    phase: Phase,
}

impl SelectionSort {
    #[must_use]
    pub fn new(input: &[Element]) -> Self {
        Self {
            ws: Workspace::new(input),
            i: 0,
            j: 1,
            min_idx: 0,
            phase: if input.is_empty() {
                Phase::Done
            } else {
                Phase::Scan
            },
        }
    }
}

impl Iterator for SelectionSort {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Scan => {
                    if self.j >= self.ws.len() {
                        self.phase = Phase::Exchange;
                        continue;
                    }
                    let (min_idx, j) = (self.min_idx, self.j);
                    let event = self.ws.compare(min_idx, j);
                    if self.ws.value(j) < self.ws.value(min_idx) {
                        self.min_idx = j;
                    }
                    self.j += 1;
                    return Some(event.with_source_line(Some(LINE_COMPARE)));
                }
                Phase::Exchange => {
                    self.phase = Phase::Finalize;
                    let event = self.ws.exchange(self.i, self.min_idx);
                    return Some(event.with_source_line(Some(LINE_EXCHANGE)));
                }
                Phase::Finalize => {
                    let settled = self.i;
                    self.i += 1;
                    self.min_idx = self.i;
                    self.j = self.i + 1;
                    self.phase = if self.i >= self.ws.len() {
                        Phase::Done
                    } else {
                        Phase::Scan
                    };
                    let event = self.ws.finalize(vec![settled]);
                    return Some(event.with_source_line(Some(LINE_FINALIZE)));
                }
            }
        }
    }
}

impl SortTrace for SelectionSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Selection
    }

    fn working(&self) -> &[Element] {
        self.ws.as_slice()
    }
}
