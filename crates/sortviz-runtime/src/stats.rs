#![forbid(unsafe_code)]

//! Run statistics and clocks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sortviz_core::StepKind;
use web_time::{Duration, Instant};

/// Counters for one run. Reset on every start; never decrease otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunStats {
    pub comparisons: u64,
    pub exchanges: u64,
    pub elapsed: Duration,
    /// `(comparisons + exchanges) / elapsed_seconds`, rounded down. Elapsed
    /// time of zero counts as one second.
    pub ops_per_sec: u64,
}

impl RunStats {
    /// Count one applied event.
    pub fn record(&mut self, kind: StepKind) {
        match kind {
            StepKind::Compare => self.comparisons += 1,
            StepKind::Exchange => self.exchanges += 1,
            StepKind::Finalized => {}
        }
    }

    /// Update elapsed time and the derived rate.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
        let secs = elapsed.as_secs_f64();
        let denom = if secs > 0.0 { secs } else { 1.0 };
        self.ops_per_sec = (self.total_ops() as f64 / denom).floor() as u64;
    }

    #[inline]
    #[must_use]
    pub fn total_ops(&self) -> u64 {
        self.comparisons + self.exchanges
    }

    /// Same counters, ignoring timing.
    #[must_use]
    pub fn same_counts(&self, other: &Self) -> bool {
        self.comparisons == other.comparisons && self.exchanges == other.exchanges
    }
}

/// Monotonic time source used for elapsed-time statistics.
pub trait Clock: Send {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`web_time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.nanos
            .fetch_add(by.as_nanos() as u64, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}
