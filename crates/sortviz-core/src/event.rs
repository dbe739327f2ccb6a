#![forbid(unsafe_code)]

//! Step events: the shared vocabulary between algorithms and players.
//!
//! Every primitive unit of algorithmic work is reported as exactly one
//! [`StepEvent`], carrying a [`Snapshot`] of the working array taken at the
//! moment the event was produced.
//!
//! # Invariants
//!
//! 1. `Compare` never changes the array: its snapshot equals the previous one.
//! 2. `Exchange` reports a completed positional move; its snapshot already
//!    reflects the move.
//! 3. `Finalized` indices are settled for the rest of the run (merge sort
//!    finalizes each merged run, which later merges may still reorder).
//! 4. Snapshots are immutable; players may retain them indefinitely.

use std::fmt;
use std::sync::Arc;

use crate::element::Element;

/// Immutable copy of the array at the moment of one event.
pub type Snapshot = Arc<[Element]>;

/// Kind of observable progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepKind {
    /// Two positions were compared. Never mutates.
    Compare,
    /// Elements moved between positions (swap, or a merge placement).
    Exchange,
    /// Positions that will not move again.
    Finalized,
}

impl StepKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compare => "compare",
            Self::Exchange => "exchange",
            Self::Finalized => "finalized",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrete unit of algorithm progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepEvent {
    pub kind: StepKind,
    /// Touched positions, in the order the algorithm reports them.
    pub indices: Vec<usize>,
    pub snapshot: Snapshot,
    /// Conceptual source line, for code-highlight presentation only.
    pub source_line: Option<u32>,
}

impl StepEvent {
    #[must_use]
    pub fn new(kind: StepKind, indices: Vec<usize>, snapshot: Snapshot) -> Self {
        Self {
            kind,
            indices,
            snapshot,
            source_line: None,
        }
    }

    #[must_use]
    pub fn with_source_line(mut self, line: Option<u32>) -> Self {
        self.source_line = line;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_compare(&self) -> bool {
        self.kind == StepKind::Compare
    }

    #[inline]
    #[must_use]
    pub fn is_exchange(&self) -> bool {
        self.kind == StepKind::Exchange
    }

    #[inline]
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.kind == StepKind::Finalized
    }

    /// Values currently held at the touched positions.
    ///
    /// Out-of-range indices are skipped.
    #[must_use]
    pub fn touched_values(&self) -> Vec<u32> {
        self.indices
            .iter()
            .filter_map(|&idx| self.snapshot.get(idx).map(|e| e.value))
            .collect()
    }

    /// Human readable status line for this event.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            StepKind::Compare => format!("Comparing indices {}", join(&self.indices, " & ")),
            StepKind::Exchange => {
                format!("Swapping values at indices {}", join(&self.indices, " & "))
            }
            StepKind::Finalized => format!(
                "Elements at {} are now in sorted position",
                join(&self.indices, ", ")
            ),
        }
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, join(&self.indices, ","))
    }
}

fn join(indices: &[usize], sep: &str) -> String {
    indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
