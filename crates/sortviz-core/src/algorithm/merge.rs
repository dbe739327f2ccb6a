//! Top-down merge sort.

use super::{Algorithm, SortTrace, Workspace};
use crate::element::Element;
use crate::event::StepEvent;

/// Pending work on the explicit recursion stack. Ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Split `[start, end]` into halves.
    Split { start: usize, end: usize },
    /// Both halves of `[start, end]` are sorted; merge them.
    Merge { start: usize, end: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Next,
    Compare,
    /// Write the head chosen by the last comparison.
    Place { take_left: bool },
    DrainLeft,
    DrainRight,
    Settle,
    Done,
}

/// State of the merge in progress. `left` and `right` are copies of the two
/// halves taken when the merge began.
#[derive(Debug, Clone, Default)]
struct Merging {
    start: usize,
    mid: usize,
    end: usize,
    left: Vec<Element>,
    right: Vec<Element>,
    i: usize,
    j: usize,
    k: usize,
}

/// Events are only produced while merging: a compare of the two heads, one
/// placement per written element (drain loops included), then one finalize
/// covering the merged run.
///
/// Placements overwrite in place, so a snapshot taken mid-merge may show an
/// element twice and miss another; the array is a permutation again once the
/// merge completes.
#[derive(Debug, Clone)]
pub struct MergeSort {
    ws: Workspace,
    stack: Vec<Frame>,
    merging: Merging,
    phase: Phase,
}

impl MergeSort {
    #[must_use]
    pub fn new(input: &[Element]) -> Self {
        let ws = Workspace::new(input);
        let (stack, phase) = match ws.len() {
            0 => (Vec::new(), Phase::Done),
            1 => (Vec::new(), Phase::Settle),
            n => (
                vec![Frame::Split {
                    start: 0,
                    end: n - 1,
                }],
                Phase::Next,
            ),
        };
        Self {
            ws,
            stack,
            merging: Merging::default(),
            phase,
        }
    }

    fn begin_merge(&mut self, start: usize, end: usize) {
        let mid = start + (end - start) / 2;
        let arr = self.ws.as_slice();
        self.merging = Merging {
            start,
            mid,
            end,
            left: arr[start..=mid].to_vec(),
            right: arr[mid + 1..=end].to_vec(),
            i: 0,
            j: 0,
            k: start,
        };
        self.phase = Phase::Compare;
    }
}

impl Iterator for MergeSort {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Next => match self.stack.pop() {
                    None => self.phase = Phase::Done,
                    Some(Frame::Split { start, end }) => {
                        if start >= end {
                            continue;
                        }
                        let mid = start + (end - start) / 2;
                        self.stack.push(Frame::Merge { start, end });
                        self.stack.push(Frame::Split {
                            start: mid + 1,
                            end,
                        });
                        self.stack.push(Frame::Split { start, end: mid });
                    }
                    Some(Frame::Merge { start, end }) => self.begin_merge(start, end),
                },
                Phase::Compare => {
                    let m = &self.merging;
                    if m.i >= m.left.len() || m.j >= m.right.len() {
                        self.phase = Phase::DrainLeft;
                        continue;
                    }
                    let take_left = m.left[m.i].value <= m.right[m.j].value;
                    let event = self.ws.compare(m.start + m.i, m.mid + 1 + m.j);
                    self.phase = Phase::Place { take_left };
                    return Some(event);
                }
                Phase::Place { take_left } => {
                    let m = &mut self.merging;
                    let element = if take_left {
                        m.i += 1;
                        m.left[m.i - 1]
                    } else {
                        m.j += 1;
                        m.right[m.j - 1]
                    };
                    let k = m.k;
                    m.k += 1;
                    self.phase = Phase::Compare;
                    return Some(self.ws.place(k, element));
                }
                Phase::DrainLeft => {
                    let m = &mut self.merging;
                    if m.i >= m.left.len() {
                        self.phase = Phase::DrainRight;
                        continue;
                    }
                    let element = m.left[m.i];
                    let k = m.k;
                    m.i += 1;
                    m.k += 1;
                    return Some(self.ws.place(k, element));
                }
                Phase::DrainRight => {
                    let m = &mut self.merging;
                    if m.j >= m.right.len() {
                        self.phase = Phase::Settle;
                        continue;
                    }
                    let element = m.right[m.j];
                    let k = m.k;
                    m.j += 1;
                    m.k += 1;
                    return Some(self.ws.place(k, element));
                }
                Phase::Settle => {
                    let run: Vec<usize> = if self.ws.len() == 1 {
                        vec![0]
                    } else {
                        (self.merging.start..=self.merging.end).collect()
                    };
                    self.phase = if self.ws.len() == 1 {
                        Phase::Done
                    } else {
                        Phase::Next
                    };
                    return Some(self.ws.finalize(run));
                }
            }
        }
    }
}

impl SortTrace for MergeSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Merge
    }

    fn working(&self) -> &[Element] {
        self.ws.as_slice()
    }
}
