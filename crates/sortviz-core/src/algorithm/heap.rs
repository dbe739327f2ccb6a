//! Heap sort.

use super::{Algorithm, SortTrace, Workspace};
use crate::element::Element;
use crate::event::StepEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Sift the next build root, or move on to extraction.
    Build,
    SiftLeft,
    SiftRight,
    SiftSwap,
    /// Swap the root with the last unsorted slot.
    Extract,
    /// Report the extracted slot as settled, then re-sift.
    Settle,
    SettleRoot,
    Done,
}

/// Where to continue once the current sift-down ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Build,
    Extract,
}

#[derive(Debug, Clone, Copy)]
struct Sift {
    node: usize,
    largest: usize,
    size: usize,
    resume: Resume,
}

/// Builds a max-heap bottom-up, then repeatedly moves the root behind the
/// shrinking heap. Sift-down is iterative; each child comparison is one
/// event and each parent/child swap is one event.
#[derive(Debug, Clone)]
pub struct HeapSort {
    ws: Workspace,
    build_next: Option<usize>,
    end: usize,
    sift: Sift,
    phase: Phase,
}

impl HeapSort {
    #[must_use]
    pub fn new(input: &[Element]) -> Self {
        let n = input.len();
        Self {
            ws: Workspace::new(input),
            build_next: (n / 2).checked_sub(1),
            end: n.saturating_sub(1),
            sift: Sift {
                node: 0,
                largest: 0,
                size: 0,
                resume: Resume::Build,
            },
            phase: if n == 0 { Phase::Done } else { Phase::Build },
        }
    }

    fn begin_sift(&mut self, node: usize, size: usize, resume: Resume) {
        self.sift = Sift {
            node,
            largest: node,
            size,
            resume,
        };
        self.phase = Phase::SiftLeft;
    }

    /// Compare `child` against the current largest, if it is inside the heap.
    fn compare_child(&mut self, child: usize) -> Option<StepEvent> {
        if child >= self.sift.size {
            return None;
        }
        let largest = self.sift.largest;
        let event = self.ws.compare(child, largest);
        if self.ws.value(child) > self.ws.value(largest) {
            self.sift.largest = child;
        }
        Some(event)
    }
}

impl Iterator for HeapSort {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Build => match self.build_next {
                    Some(root) => {
                        self.build_next = root.checked_sub(1);
                        self.begin_sift(root, self.ws.len(), Resume::Build);
                    }
                    None if self.end == 0 => self.phase = Phase::SettleRoot,
                    None => self.phase = Phase::Extract,
                },
                Phase::SiftLeft => {
                    self.phase = Phase::SiftRight;
                    if let Some(event) = self.compare_child(2 * self.sift.node + 1) {
                        return Some(event);
                    }
                }
                Phase::SiftRight => {
                    self.phase = Phase::SiftSwap;
                    if let Some(event) = self.compare_child(2 * self.sift.node + 2) {
                        return Some(event);
                    }
                }
                Phase::SiftSwap => {
                    let Sift { node, largest, .. } = self.sift;
                    if largest != node {
                        self.sift.node = largest;
                        self.phase = Phase::SiftLeft;
                        return Some(self.ws.exchange(node, largest));
                    }
                    self.phase = match self.sift.resume {
                        Resume::Build => Phase::Build,
                        Resume::Extract => {
                            self.end -= 1;
                            if self.end == 0 {
                                Phase::SettleRoot
                            } else {
                                Phase::Extract
                            }
                        }
                    };
                }
                Phase::Extract => {
                    self.phase = Phase::Settle;
                    return Some(self.ws.exchange(0, self.end));
                }
                Phase::Settle => {
                    let end = self.end;
                    self.begin_sift(0, end, Resume::Extract);
                    return Some(self.ws.finalize(vec![end]));
                }
                Phase::SettleRoot => {
                    self.phase = Phase::Done;
                    return Some(self.ws.finalize(vec![0]));
                }
            }
        }
    }
}

impl SortTrace for HeapSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Heap
    }

    fn working(&self) -> &[Element] {
        self.ws.as_slice()
    }
}
