#![forbid(unsafe_code)]

//! Elements and randomized input generation.
//!
//! An [`Element`] pairs a display value with a stable [`ElementId`]. Sorting
//! reorders elements by moving them between positions; neither the id nor the
//! value of an element is ever rewritten once generated.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Opaque identity of an element. Survives every reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The atomic data unit carried through every algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub id: ElementId,
    pub value: u32,
}

impl Element {
    #[inline]
    #[must_use]
    pub const fn new(id: u64, value: u32) -> Self {
        Self {
            id: ElementId(id),
            value,
        }
    }
}

/// Build elements from raw values, using each value's position as its id.
#[must_use]
pub fn elements_from_values(values: &[u32]) -> Vec<Element> {
    values
        .iter()
        .enumerate()
        .map(|(idx, &value)| Element::new(idx as u64, value))
        .collect()
}

/// Returns `true` if values are in non-decreasing order.
#[must_use]
pub fn is_sorted_by_value(elements: &[Element]) -> bool {
    elements.windows(2).all(|w| w[0].value <= w[1].value)
}

/// Returns `true` if `a` and `b` hold the same elements (by id and value),
/// ignoring order.
#[must_use]
pub fn same_identities(a: &[Element], b: &[Element]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut lhs: Vec<(ElementId, u32)> = a.iter().map(|e| (e.id, e.value)).collect();
    let mut rhs: Vec<(ElementId, u32)> = b.iter().map(|e| (e.id, e.value)).collect();
    lhs.sort_unstable();
    rhs.sort_unstable();
    lhs == rhs
}

/// Shape of a generated input array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Number of elements.
    pub size: usize,
    /// Smallest value (inclusive).
    pub min_value: u32,
    /// Largest value (inclusive).
    pub max_value: u32,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            size: 20,
            min_value: 5,
            max_value: 89,
        }
    }
}

impl ArrayConfig {
    /// Default shape for side-by-side comparison runs.
    #[must_use]
    pub fn comparison() -> Self {
        Self {
            size: 30,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the value range. Bounds are swapped if given in reverse.
    #[must_use]
    pub fn with_range(mut self, min_value: u32, max_value: u32) -> Self {
        self.min_value = min_value.min(max_value);
        self.max_value = min_value.max(max_value);
        self
    }
}

/// Produces fresh random element arrays.
///
/// Ids come from a counter owned by the generator, so every element produced
/// by one generator has a distinct id even across regenerations.
#[derive(Debug, Clone)]
pub struct ArrayGenerator {
    config: ArrayConfig,
    rng: SmallRng,
    next_id: u64,
}

impl ArrayGenerator {
    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn new(config: ArrayConfig) -> Self {
        Self {
            config,
            rng: SmallRng::from_os_rng(),
            next_id: 0,
        }
    }

    /// Create a deterministic generator.
    #[must_use]
    pub fn seeded(config: ArrayConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> ArrayConfig {
        self.config
    }

    /// Generate a new array.
    pub fn generate(&mut self) -> Vec<Element> {
        let ArrayConfig {
            size,
            min_value,
            max_value,
        } = self.config;
        let mut out = Vec::with_capacity(size);
        for _ in 0..size {
            let value = self.rng.random_range(min_value..=max_value);
            out.push(Element::new(self.next_id, value));
            self.next_id += 1;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(size, min_value, max_value, "generated input array");
        out
    }
}
