//! Bubble sort.

use super::{Algorithm, SortTrace, Workspace};
use crate::element::Element;
use crate::event::StepEvent;

const LINE_COMPARE: u32 = 5;
const LINE_EXCHANGE: u32 = 8;
const LINE_FINALIZE: u32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Compare,
    Exchange,
    Finalize,
    Done,
}

/// Pass `i` bubbles the largest unsettled value to position `n - i - 1`.
#[derive(Debug, Clone)]
pub struct BubbleSort {
    ws: Workspace,
    pass: usize,
    j: usize,
    phase: Phase,
}

impl BubbleSort {
    #[must_use]
    pub fn new(input: &[Element]) -> Self {
        Self {
            ws: Workspace::new(input),
            pass: 0,
            j: 0,
            phase: Phase::Compare,
        }
    }
}

impl Iterator for BubbleSort {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        let n = self.ws.len();
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Compare => {
                    if self.pass >= n {
                        self.phase = Phase::Done;
                        continue;
                    }
                    if self.j + 1 >= n - self.pass {
                        self.phase = Phase::Finalize;
                        continue;
                    }
                    let j = self.j;
                    let event = self.ws.compare(j, j + 1);
                    if self.ws.value(j) > self.ws.value(j + 1) {
                        self.phase = Phase::Exchange;
                    } else {
                        self.j += 1;
                    }
                    return Some(event.with_source_line(Some(LINE_COMPARE)));
                }
                Phase::Exchange => {
                    let j = self.j;
                    self.j += 1;
                    self.phase = Phase::Compare;
                    let event = self.ws.exchange(j, j + 1);
                    return Some(event.with_source_line(Some(LINE_EXCHANGE)));
                }
                Phase::Finalize => {
                    let settled = n - self.pass - 1;
                    self.pass += 1;
                    self.j = 0;
                    self.phase = Phase::Compare;
                    let event = self.ws.finalize(vec![settled]);
                    return Some(event.with_source_line(Some(LINE_FINALIZE)));
                }
            }
        }
    }
}

impl SortTrace for BubbleSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bubble
    }

    fn working(&self) -> &[Element] {
        self.ws.as_slice()
    }
}
