#![forbid(unsafe_code)]

//! Instrumented comparison sorts.
//!
//! Each algorithm is an explicit state machine implementing [`SortTrace`].
//! A call to `next()` performs exactly one primitive operation (one
//! comparison, one exchange or placement, or one finalize) on a private
//! working copy and returns the event describing it. Nothing else happens
//! between two pulls, so a consumer can stop between any two operations.
//!
//! The input slice is copied up front and never touched again. Once a trace
//! is exhausted, [`SortTrace::working`] holds the input sorted ascending by
//! value.
//!
//! # Registry
//!
//! [`Algorithm`] is the identifier for the six strategies. Use
//! [`Algorithm::trace`] to start a run:
//!
//! ```
//! use sortviz_core::{Algorithm, StepKind, elements_from_values};
//!
//! let input = elements_from_values(&[2, 1]);
//! let kinds: Vec<StepKind> = Algorithm::Bubble.trace(&input).map(|e| e.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [StepKind::Compare, StepKind::Exchange, StepKind::Finalized, StepKind::Finalized]
//! );
//! ```

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::BubbleSort;
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

use std::fmt;
use std::str::FromStr;

use crate::element::Element;
use crate::event::{Snapshot, StepEvent, StepKind};

/// A lazy, finite, non-restartable stream of step events over a private
/// copy of the input.
pub trait SortTrace: Iterator<Item = StepEvent> + Send {
    /// Which strategy produced this trace.
    fn algorithm(&self) -> Algorithm;

    /// The working copy in its current state.
    fn working(&self) -> &[Element];
}

/// The six supported sorting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    Bubble,
    Insertion,
    Selection,
    Quick,
    Merge,
    Heap,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Heap,
    ];

    /// Stable identifier, e.g. `"quick-sort"`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bubble => "bubble-sort",
            Self::Insertion => "insertion-sort",
            Self::Selection => "selection-sort",
            Self::Quick => "quick-sort",
            Self::Merge => "merge-sort",
            Self::Heap => "heap-sort",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Insertion => "Insertion Sort",
            Self::Selection => "Selection Sort",
            Self::Quick => "Quick Sort",
            Self::Merge => "Merge Sort",
            Self::Heap => "Heap Sort",
        }
    }

    /// Start a new trace over a copy of `input`.
    #[must_use]
    pub fn trace(self, input: &[Element]) -> Box<dyn SortTrace> {
        #[cfg(feature = "tracing")]
        tracing::debug!(algorithm = self.id(), len = input.len(), "starting trace");
        match self {
            Self::Bubble => Box::new(BubbleSort::new(input)),
            Self::Insertion => Box::new(InsertionSort::new(input)),
            Self::Selection => Box::new(SelectionSort::new(input)),
            Self::Quick => Box::new(QuickSort::new(input)),
            Self::Merge => Box::new(MergeSort::new(input)),
            Self::Heap => Box::new(HeapSort::new(input)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an algorithm identifier is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    input: String,
}

impl ParseAlgorithmError {
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm '{}'", self.input)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Accepts `quick-sort`, `quick_sort`, `quicksort` or `quick`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        let stem = norm.strip_suffix("sort").unwrap_or(&norm);
        Self::ALL
            .into_iter()
            .find(|a| a.id().trim_end_matches("-sort") == stem)
            .ok_or_else(|| ParseAlgorithmError {
                input: s.to_string(),
            })
    }
}

/// Private working copy shared by the state machines.
///
/// Every mutator returns the event describing it, so a mutation can never
/// happen without its event.
#[derive(Debug, Clone)]
pub(crate) struct Workspace {
    arr: Vec<Element>,
}

impl Workspace {
    pub(crate) fn new(input: &[Element]) -> Self {
        Self {
            arr: input.to_vec(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.arr.len()
    }

    #[inline]
    pub(crate) fn value(&self, idx: usize) -> u32 {
        self.arr[idx].value
    }

    #[inline]
    pub(crate) fn get(&self, idx: usize) -> Element {
        self.arr[idx]
    }

    pub(crate) fn as_slice(&self) -> &[Element] {
        &self.arr
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from(self.arr.as_slice())
    }

    pub(crate) fn compare(&self, a: usize, b: usize) -> StepEvent {
        StepEvent::new(StepKind::Compare, vec![a, b], self.snapshot())
    }

    pub(crate) fn exchange(&mut self, a: usize, b: usize) -> StepEvent {
        self.arr.swap(a, b);
        StepEvent::new(StepKind::Exchange, vec![a, b], self.snapshot())
    }

    /// Write `element` at `idx` (merge placement).
    pub(crate) fn place(&mut self, idx: usize, element: Element) -> StepEvent {
        self.arr[idx] = element;
        StepEvent::new(StepKind::Exchange, vec![idx], self.snapshot())
    }

    pub(crate) fn finalize(&self, indices: Vec<usize>) -> StepEvent {
        StepEvent::new(StepKind::Finalized, indices, self.snapshot())
    }
}
