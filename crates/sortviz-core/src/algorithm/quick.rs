//! Quick sort (Lomuto partition, rightmost pivot).

use super::{Algorithm, SortTrace, Workspace};
use crate::element::Element;
use crate::event::StepEvent;

/// A half-open range `[start, end)` still to be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn len(self) -> usize {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Pop the next pending span.
    Next,
    /// Comparing `j` against the pivot at `hi`.
    Scan,
    /// Move `j` into the "less than pivot" region.
    Exchange,
    /// Swap the pivot into `store`.
    PlacePivot,
    /// Report the pivot's final position.
    SettlePivot,
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Partition {
    lo: usize,
    hi: usize,
    store: usize,
    j: usize,
}

/// Recursion is replaced by an explicit stack of spans. The left part of a
/// partition is pushed last so it is fully processed before the right part.
#[derive(Debug, Clone)]
pub struct QuickSort {
    ws: Workspace,
    pending: Vec<Span>,
    part: Partition,
    phase: Phase,
}

impl QuickSort {
    #[must_use]
    pub fn new(input: &[Element]) -> Self {
        let ws = Workspace::new(input);
        let pending = vec![Span {
            start: 0,
            end: ws.len(),
        }];
        Self {
            ws,
            pending,
            part: Partition {
                lo: 0,
                hi: 0,
                store: 0,
                j: 0,
            },
            phase: Phase::Next,
        }
    }
}

impl Iterator for QuickSort {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Next => {
                    let Some(span) = self.pending.pop() else {
                        self.phase = Phase::Done;
                        continue;
                    };
                    match span.len() {
                        0 => continue,
                        1 => return Some(self.ws.finalize(vec![span.start])),
                        _ => {
                            self.part = Partition {
                                lo: span.start,
                                hi: span.end - 1,
                                store: span.start,
                                j: span.start,
                            };
                            self.phase = Phase::Scan;
                        }
                    }
                }
                Phase::Scan => {
                    let Partition { hi, j, .. } = self.part;
                    if j >= hi {
                        self.phase = Phase::PlacePivot;
                        continue;
                    }
                    let event = self.ws.compare(j, hi);
                    if self.ws.value(j) < self.ws.value(hi) {
                        self.phase = Phase::Exchange;
                    } else {
                        self.part.j += 1;
                    }
                    return Some(event);
                }
                Phase::Exchange => {
                    let Partition { store, j, .. } = self.part;
                    self.part.store += 1;
                    self.part.j += 1;
                    self.phase = Phase::Scan;
                    return Some(self.ws.exchange(store, j));
                }
                Phase::PlacePivot => {
                    let Partition { store, hi, .. } = self.part;
                    self.phase = Phase::SettlePivot;
                    return Some(self.ws.exchange(store, hi));
                }
                Phase::SettlePivot => {
                    let Partition { lo, hi, store, .. } = self.part;
                    self.pending.push(Span {
                        start: store + 1,
                        end: hi + 1,
                    });
                    self.pending.push(Span {
                        start: lo,
                        end: store,
                    });
                    self.phase = Phase::Next;
                    return Some(self.ws.finalize(vec![store]));
                }
            }
        }
    }
}

impl SortTrace for QuickSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Quick
    }

    fn working(&self) -> &[Element] {
        self.ws.as_slice()
    }
}
