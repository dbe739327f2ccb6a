#![forbid(unsafe_code)]

//! Side-by-side playback of two algorithms.
//!
//! A [`DualPlayer`] owns two independent [`Player`]s and advances each by at
//! most one event per shared tick. Sides never read each other's state; the
//! only thing they share is the delay between ticks. A side that completes
//! stops advancing while the other carries on alone.

use std::fmt;

use sortviz_core::{Algorithm, Element};
use web_time::Duration;

use crate::config::PlaybackConfig;
use crate::player::{PlaybackState, Player, Tick};

/// Which half of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one shared tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualTick {
    pub left: Tick,
    pub right: Tick,
}

impl DualTick {
    #[must_use]
    pub fn advanced(self) -> bool {
        self.left.advanced() || self.right.advanced()
    }
}

/// Two players stepped in lockstep.
#[derive(Debug)]
pub struct DualPlayer {
    left: Player,
    right: Player,
    delay: Duration,
}

impl DualPlayer {
    /// Pair two players. The left player's delay becomes the shared delay.
    #[must_use]
    pub fn new(left: Player, right: Player) -> Self {
        let delay = left.delay();
        let mut dual = Self { left, right, delay };
        dual.set_speed(delay);
        dual
    }

    /// Two null-sink players over copies of the same input.
    #[must_use]
    pub fn over(
        left: Algorithm,
        right: Algorithm,
        input: Vec<Element>,
        config: PlaybackConfig,
    ) -> Self {
        Self::new(
            Player::new(left, input.clone()).with_config(config),
            Player::new(right, input).with_config(config),
        )
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Combined state: running if either side runs, paused if either side
    /// is paused, completed only once both are.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        let (l, r) = (self.left.state(), self.right.state());
        if l == PlaybackState::Running || r == PlaybackState::Running {
            PlaybackState::Running
        } else if l == PlaybackState::Paused || r == PlaybackState::Paused {
            PlaybackState::Paused
        } else if l == PlaybackState::Completed && r == PlaybackState::Completed {
            PlaybackState::Completed
        } else {
            PlaybackState::Idle
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == PlaybackState::Running
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.left.is_completed() && self.right.is_completed()
    }

    fn in_progress(&self) -> bool {
        matches!(self.state(), PlaybackState::Running | PlaybackState::Paused)
    }

    /// Start both sides. Rejected unless both sides can start.
    pub fn start(&mut self) -> bool {
        if self.in_progress() {
            return false;
        }
        let left = self.left.start();
        let right = self.right.start();
        tracing::debug!(
            left = self.left.algorithm().id(),
            right = self.right.algorithm().id(),
            "comparison started"
        );
        left && right
    }

    pub fn pause(&mut self) -> bool {
        self.each(Player::pause)
    }

    pub fn resume(&mut self) -> bool {
        self.each(Player::resume)
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state() {
            PlaybackState::Running => self.pause(),
            PlaybackState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Step every paused side by one event.
    pub fn step_forward(&mut self) -> bool {
        self.each(Player::step_forward)
    }

    pub fn step_backward(&mut self) -> bool {
        self.each(Player::step_backward)
    }

    pub fn set_speed(&mut self, delay: Duration) {
        self.delay = delay;
        self.left.set_speed(delay);
        self.right.set_speed(delay);
    }

    pub fn set_sound(&mut self, sound: bool) {
        self.left.set_sound(sound);
        self.right.set_sound(sound);
    }

    /// Give both sides a copy of `input`. Rejected while either side runs.
    pub fn reset(&mut self, input: Vec<Element>) -> bool {
        if self.state() == PlaybackState::Running {
            return false;
        }
        self.left.reset(input.clone()) && self.right.reset(input)
    }

    /// Choose the algorithm for one side. Rejected while the comparison is
    /// running or paused, even if that side has already finished.
    pub fn select(&mut self, side: Side, algorithm: Algorithm) -> bool {
        if self.in_progress() {
            return false;
        }
        self.side_mut(side).set_algorithm(algorithm)
    }

    /// Choose one algorithm for both sides. Rejected as a whole while the
    /// comparison is running or paused.
    pub fn select_both(&mut self, algorithm: Algorithm) -> bool {
        if self.in_progress() {
            return false;
        }
        Side::BOTH
            .iter()
            .fold(true, |ok, &side| self.side_mut(side).set_algorithm(algorithm) && ok)
    }

    /// Advance each side by at most one event.
    pub fn tick(&mut self) -> DualTick {
        let tick = DualTick {
            left: self.left.tick(),
            right: self.right.tick(),
        };
        if tick.advanced() && self.is_finished() {
            tracing::info!(
                left = self.left.algorithm().id(),
                left_ops = self.left.stats().total_ops(),
                right = self.right.algorithm().id(),
                right_ops = self.right.stats().total_ops(),
                "comparison completed"
            );
        }
        tick
    }

    /// Tick until both sides complete. Returns the number of shared ticks.
    pub fn run_to_completion(&mut self) -> usize {
        let mut ticks = 0;
        while self.is_running() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    fn each(&mut self, mut op: impl FnMut(&mut Player) -> bool) -> bool {
        let left = op(&mut self.left);
        let right = op(&mut self.right);
        left || right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ManualClock;
    use sortviz_core::{elements_from_values, is_sorted_by_value};

    fn dual(left: Algorithm, right: Algorithm, values: &[u32]) -> DualPlayer {
        let input = elements_from_values(values);
        DualPlayer::new(
            Player::new(left, input.clone())
                .with_config(PlaybackConfig::instant())
                .with_clock(ManualClock::new()),
            Player::new(right, input)
                .with_config(PlaybackConfig::instant())
                .with_clock(ManualClock::new()),
        )
    }

    #[test]
    fn selection_rejected_while_one_side_still_runs() {
        let player = |algorithm, values: &[u32]| {
            Player::new(algorithm, elements_from_values(values))
                .with_config(PlaybackConfig::instant())
                .with_clock(ManualClock::new())
        };
        let mut d = DualPlayer::new(
            player(Algorithm::Quick, &[1]),
            player(Algorithm::Bubble, &[4, 3, 2, 1]),
        );
        d.start();
        d.tick();
        d.tick();
        assert!(d.side(Side::Left).is_completed());
        assert_eq!(d.state(), PlaybackState::Running);

        assert!(!d.select(Side::Left, Algorithm::Heap));
        assert!(!d.select_both(Algorithm::Heap));
        d.pause();
        assert!(!d.select(Side::Left, Algorithm::Heap));
        assert_eq!(d.side(Side::Left).algorithm(), Algorithm::Quick);
        assert_eq!(d.side(Side::Right).algorithm(), Algorithm::Bubble);

        d.resume();
        d.run_to_completion();
        assert!(d.is_finished());
        assert_eq!(d.state(), PlaybackState::Completed);
    }

    #[test]
    fn selection_accepted_once_comparison_settles() {
        let mut d = dual(Algorithm::Quick, Algorithm::Bubble, &[2, 1]);
        assert!(d.select(Side::Right, Algorithm::Merge));
        d.start();
        d.run_to_completion();
        assert!(d.select_both(Algorithm::Heap));
        assert_eq!(d.side(Side::Left).algorithm(), Algorithm::Heap);
        assert_eq!(d.side(Side::Right).algorithm(), Algorithm::Heap);
        assert_eq!(d.state(), PlaybackState::Idle);
    }

    #[test]
    fn both_sides_finish_sorted() {
        let mut d = dual(Algorithm::Bubble, Algorithm::Merge, &[5, 3, 4, 1, 2]);
        assert!(d.start());
        d.run_to_completion();
        assert!(d.is_finished());
        for side in Side::BOTH {
            assert!(is_sorted_by_value(&d.side(side).view().snapshot));
        }
    }

    #[test]
    fn one_event_per_side_per_tick() {
        let mut d = dual(Algorithm::Bubble, Algorithm::Selection, &[3, 1, 2]);
        d.start();
        let tick = d.tick();
        assert_eq!(tick.left, Tick::Applied(sortviz_core::StepKind::Compare));
        assert_eq!(tick.right, Tick::Applied(sortviz_core::StepKind::Compare));
        assert_eq!(d.side(Side::Left).history().len(), 1);
        assert_eq!(d.side(Side::Right).history().len(), 1);
    }

    #[test]
    fn finished_side_idles_while_other_continues() {
        // Insertion on sorted input needs far fewer events than bubble.
        let mut d = dual(Algorithm::Insertion, Algorithm::Bubble, &[1, 2, 3, 4, 5, 6]);
        d.start();
        let mut solo_ticks = 0;
        while d.is_running() {
            let left_done = d.side(Side::Left).is_completed();
            let left_stats = *d.side(Side::Left).stats();
            let tick = d.tick();
            if left_done {
                solo_ticks += 1;
                assert_eq!(tick.left, Tick::Idle);
                assert!(tick.right.advanced());
                assert_eq!(*d.side(Side::Left).stats(), left_stats);
            }
        }
        assert!(solo_ticks > 0);
        assert_eq!(d.side(Side::Right).stats().comparisons, 15);
        assert_eq!(d.side(Side::Left).stats().comparisons, 5);
    }

    #[test]
    fn reset_feeds_same_input_to_both() {
        let mut d = dual(Algorithm::Quick, Algorithm::Heap, &[2, 1]);
        let input = elements_from_values(&[9, 8, 7]);
        assert!(d.reset(input.clone()));
        assert_eq!(d.side(Side::Left).input(), input.as_slice());
        assert_eq!(d.side(Side::Right).input(), input.as_slice());
    }

    #[test]
    fn reset_rejected_while_running() {
        let mut d = dual(Algorithm::Quick, Algorithm::Heap, &[2, 1]);
        d.start();
        assert!(!d.reset(elements_from_values(&[1])));
    }

    #[test]
    fn select_changes_one_side() {
        let mut d = dual(Algorithm::Quick, Algorithm::Heap, &[2, 1]);
        assert!(d.select(Side::Right, Algorithm::Insertion));
        assert_eq!(d.side(Side::Left).algorithm(), Algorithm::Quick);
        assert_eq!(d.side(Side::Right).algorithm(), Algorithm::Insertion);
    }

    #[test]
    fn shared_speed() {
        let mut d = dual(Algorithm::Quick, Algorithm::Heap, &[2, 1]);
        d.set_speed(Duration::from_millis(120));
        assert_eq!(d.delay(), Duration::from_millis(120));
        for side in Side::BOTH {
            assert_eq!(d.side(side).delay(), Duration::from_millis(120));
        }
    }

    #[test]
    fn pause_and_step_apply_to_both() {
        let mut d = dual(Algorithm::Bubble, Algorithm::Insertion, &[3, 1, 2]);
        d.start();
        assert!(d.pause());
        assert_eq!(d.state(), PlaybackState::Paused);
        assert!(d.step_forward());
        assert_eq!(d.side(Side::Left).stats().comparisons, 1);
        assert_eq!(d.side(Side::Right).stats().comparisons, 1);
        assert!(d.resume());
        assert!(d.is_running());
    }

    #[test]
    fn start_rejected_while_live() {
        let mut d = dual(Algorithm::Bubble, Algorithm::Insertion, &[3, 1, 2]);
        d.start();
        assert!(!d.start());
        d.pause();
        assert!(!d.start());
    }
}
