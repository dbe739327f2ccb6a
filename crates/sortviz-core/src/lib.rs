#![forbid(unsafe_code)]

//! Sortviz core: elements, step events, and instrumented sorting algorithms.
//!
//! # Key Components
//!
//! - [`Element`] - Value plus stable identity
//! - [`ArrayGenerator`] - Random input arrays with unique ids
//! - [`StepEvent`] - One compare, exchange, or finalize with its snapshot
//! - [`Algorithm`] - Registry of the six strategies
//! - [`SortTrace`] - Lazy, pull-based event stream over a private copy
//!
//! # Role in sortviz
//! `sortviz-core` produces traces; it never waits, schedules, or renders.
//! `sortviz-runtime` pulls traces at a controllable pace and forwards
//! presentation state to sinks.

pub mod algorithm;
pub mod element;
pub mod event;

pub use algorithm::{
    Algorithm, BubbleSort, HeapSort, InsertionSort, MergeSort, ParseAlgorithmError, QuickSort,
    SelectionSort, SortTrace,
};
pub use element::{
    ArrayConfig, ArrayGenerator, Element, ElementId, elements_from_values, is_sorted_by_value,
    same_identities,
};
pub use event::{Snapshot, StepEvent, StepKind};
