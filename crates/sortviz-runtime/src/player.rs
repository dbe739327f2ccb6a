#![forbid(unsafe_code)]

//! Single-run playback controller.
//!
//! A [`Player`] owns one input array, one trace at a time, and all state
//! derived from replaying it: highlights, the finalized set, statistics, and
//! a bounded history. It is host-driven: [`Player::tick`] performs one pull
//! loop iteration (pull, classify, record, present) and [`Player::delay`]
//! tells the host how long to wait before the next one. The threaded
//! [`driver`](crate::driver) is one such host.
//!
//! # State machine
//!
//! ```text
//!            start                   trace exhausted
//!   Idle ───────────▶ Running ─────────────────────────▶ Completed
//!    ▲                 │   ▲                                 │
//!    │           pause │   │ resume                          │ start
//!    │                 ▼   │                                 │ (implicit reset)
//!    │               Paused ── step_forward (may complete) ──┘
//!    │                 │
//!    └──── reset ──────┘   (reset also accepted from Idle and Completed)
//! ```
//!
//! # Invariants
//!
//! 1. Events are applied in trace order, one per tick or step.
//! 2. Statistics count exactly the events applied since the last start.
//! 3. Stepping backward rewinds the view only; statistics and the trace
//!    position are untouched.
//! 4. Invalid controls are no-ops that return `false`.

use std::collections::BTreeSet;
use std::fmt;

use sortviz_core::{Algorithm, Element, Snapshot, SortTrace, StepEvent, StepKind};
use web_time::Duration;

use crate::config::PlaybackConfig;
use crate::history::PlaybackHistory;
use crate::sink::{AudioSink, Frame, NullAudio, NullPresenter, PresentationSink, Tone, Voice};
use crate::stats::{Clock, RunStats, SystemClock};

const STATUS_READY: &str = "Ready to start";
const STATUS_STARTING: &str = "Initializing algorithm...";
const STATUS_PAUSED: &str = "Paused";
const STATUS_COMPLETE: &str = "Sorting complete! Everything is in order.";

/// Lifecycle of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
    Completed,
}

impl PlaybackState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation state of a player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct View {
    pub snapshot: Snapshot,
    /// Positions being compared by the last applied event.
    pub comparing: Vec<usize>,
    /// Positions moved by the last applied event.
    pub swapping: Vec<usize>,
    /// Every position finalized so far in this run.
    pub finalized: BTreeSet<usize>,
    pub source_line: Option<u32>,
    pub status: String,
    /// How many history entries the display is behind the newest applied event.
    pub rewound: usize,
}

impl View {
    fn fresh(input: &[Element], status: &str) -> Self {
        Self {
            snapshot: Snapshot::from(input),
            comparing: Vec::new(),
            swapping: Vec::new(),
            finalized: BTreeSet::new(),
            source_line: None,
            status: status.to_string(),
            rewound: 0,
        }
    }

    fn clear_highlights(&mut self) {
        self.comparing.clear();
        self.swapping.clear();
    }

    /// Show `event`'s snapshot and highlights.
    fn show(&mut self, event: &StepEvent) {
        self.snapshot = event.snapshot.clone();
        self.source_line = event.source_line;
        self.status = event.describe();
        self.clear_highlights();
        match event.kind {
            StepKind::Compare => self.comparing = event.indices.clone(),
            StepKind::Exchange => self.swapping = event.indices.clone(),
            StepKind::Finalized => {}
        }
    }

    #[must_use]
    pub fn is_finalized(&self, idx: usize) -> bool {
        self.finalized.contains(&idx)
    }
}

/// Outcome of one [`Player::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not started, or already completed; nothing pulled.
    Idle,
    /// Paused; nothing pulled.
    Paused,
    /// One event was pulled and applied.
    Applied(StepKind),
    /// The trace ran out; the player is now completed.
    Completed,
}

impl Tick {
    #[must_use]
    pub fn advanced(self) -> bool {
        matches!(self, Self::Applied(_) | Self::Completed)
    }
}

/// The playback controller for one algorithm over one input array.
pub struct Player {
    algorithm: Algorithm,
    input: Vec<Element>,
    trace: Option<Box<dyn SortTrace>>,
    state: PlaybackState,
    view: View,
    stats: RunStats,
    history: PlaybackHistory,
    config: PlaybackConfig,
    started_at: Duration,
    clock: Box<dyn Clock>,
    presenter: Box<dyn PresentationSink>,
    audio: Box<dyn AudioSink>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("algorithm", &self.algorithm)
            .field("len", &self.input.len())
            .field("state", &self.state)
            .field("stats", &self.stats)
            .field("history", &self.history.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Player {
    /// Create an idle player with null sinks and the system clock.
    #[must_use]
    pub fn new(algorithm: Algorithm, input: Vec<Element>) -> Self {
        let config = PlaybackConfig::default();
        Self {
            algorithm,
            view: View::fresh(&input, STATUS_READY),
            input,
            trace: None,
            state: PlaybackState::Idle,
            stats: RunStats::default(),
            history: PlaybackHistory::new(config.history_capacity),
            config,
            started_at: Duration::ZERO,
            clock: Box::new(SystemClock::new()),
            presenter: Box::new(NullPresenter),
            audio: Box::new(NullAudio),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: PlaybackConfig) -> Self {
        self.history = PlaybackHistory::new(config.history_capacity);
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_presenter(mut self, presenter: impl PresentationSink + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    #[must_use]
    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn input(&self) -> &[Element] {
        &self.input
    }

    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    #[must_use]
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    #[must_use]
    pub fn history(&self) -> &PlaybackHistory {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Wait the host should observe before the next tick.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.config.delay
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == PlaybackState::Completed
    }

    // ========================================================================
    // Controls
    // ========================================================================

    /// Begin a run over the current input. From `Completed`, the previous
    /// run is reset first. Rejected while running or paused.
    pub fn start(&mut self) -> bool {
        if matches!(self.state, PlaybackState::Running | PlaybackState::Paused) {
            return false;
        }
        // Restarting from Completed replays the same input from scratch.
        self.clear_run(STATUS_STARTING);
        self.trace = Some(self.algorithm.trace(&self.input));
        self.started_at = self.clock.now();
        self.audio.init();
        self.state = PlaybackState::Running;
        tracing::debug!(
            algorithm = self.algorithm.id(),
            len = self.input.len(),
            "playback started"
        );
        self.present();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Running {
            return false;
        }
        self.state = PlaybackState::Paused;
        self.view.status = STATUS_PAUSED.to_string();
        tracing::debug!(algorithm = self.algorithm.id(), "playback paused");
        self.present();
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.state = PlaybackState::Running;
        tracing::debug!(algorithm = self.algorithm.id(), "playback resumed");
        true
    }

    /// Toggle between running and paused.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            PlaybackState::Running => self.pause(),
            PlaybackState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Pull and apply exactly one event while paused. The player stays
    /// paused unless the trace is exhausted, in which case it completes.
    pub fn step_forward(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.advance();
        true
    }

    /// Rewind the display to the previous history entry while paused.
    pub fn step_backward(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        let Some(entry) = self.history.rewind() else {
            return false;
        };
        self.view.show(entry);
        self.view.rewound += 1;
        tracing::trace!(
            algorithm = self.algorithm.id(),
            rewound = self.view.rewound,
            "stepped backward"
        );
        self.present();
        true
    }

    /// Set the inter-event delay. Applies from the next wait on.
    pub fn set_speed(&mut self, delay: Duration) {
        self.config.delay = delay;
    }

    pub fn set_sound(&mut self, sound: bool) {
        self.config.sound = sound;
    }

    /// Replace the input and return to `Idle`. Rejected while running;
    /// accepted while paused, discarding the in-flight trace.
    pub fn reset(&mut self, input: Vec<Element>) -> bool {
        if self.state == PlaybackState::Running {
            return false;
        }
        self.input = input;
        self.clear_run(STATUS_READY);
        self.state = PlaybackState::Idle;
        tracing::debug!(
            algorithm = self.algorithm.id(),
            len = self.input.len(),
            "playback reset"
        );
        self.present();
        true
    }

    /// Switch algorithm. Rejected while running; otherwise the player
    /// returns to `Idle` over the same input.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> bool {
        if self.state == PlaybackState::Running {
            return false;
        }
        self.algorithm = algorithm;
        self.clear_run(STATUS_READY);
        self.state = PlaybackState::Idle;
        self.present();
        true
    }

    // ========================================================================
    // Pull loop
    // ========================================================================

    /// One pull loop iteration, without the wait.
    pub fn tick(&mut self) -> Tick {
        match self.state {
            PlaybackState::Idle | PlaybackState::Completed => Tick::Idle,
            PlaybackState::Paused => Tick::Paused,
            PlaybackState::Running => self.advance(),
        }
    }

    /// Tick until the run completes, ignoring delays. Returns the number
    /// of events applied. Does nothing unless running.
    pub fn run_to_completion(&mut self) -> usize {
        let mut applied = 0;
        while let Tick::Applied(_) = self.tick() {
            applied += 1;
        }
        applied
    }

    fn advance(&mut self) -> Tick {
        let next = self.trace.as_mut().and_then(|trace| trace.next());
        match next {
            Some(event) => {
                let kind = event.kind;
                self.apply(event);
                Tick::Applied(kind)
            }
            None => {
                self.complete();
                Tick::Completed
            }
        }
    }

    fn apply(&mut self, event: StepEvent) {
        self.stats.record(event.kind);
        self.view.show(&event);
        self.view.rewound = 0;
        if event.kind == StepKind::Finalized {
            self.view.finalized.extend(event.indices.iter().copied());
        }
        if self.config.sound {
            self.sound(&event);
        }
        tracing::trace!(
            algorithm = self.algorithm.id(),
            kind = event.kind.as_str(),
            indices = ?event.indices,
            "applied step"
        );
        self.history.push(event);
        self.refresh_elapsed();
        self.present();
    }

    fn sound(&mut self, event: &StepEvent) {
        let (duration, voice) = match event.kind {
            StepKind::Compare => (self.config.compare_tone, Voice::Sine),
            StepKind::Exchange => (self.config.exchange_tone, Voice::Sawtooth),
            StepKind::Finalized => return,
        };
        for value in event.touched_values() {
            self.audio.play(Tone {
                value,
                duration,
                voice,
            });
        }
    }

    fn complete(&mut self) {
        self.trace = None;
        self.state = PlaybackState::Completed;
        self.view.finalized = (0..self.input.len()).collect();
        self.view.clear_highlights();
        self.view.status = STATUS_COMPLETE.to_string();
        self.refresh_elapsed();
        tracing::info!(
            algorithm = self.algorithm.id(),
            comparisons = self.stats.comparisons,
            exchanges = self.stats.exchanges,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "playback completed"
        );
        self.present();
    }

    /// Drop the trace, statistics, history and highlights.
    fn clear_run(&mut self, status: &str) {
        self.trace = None;
        self.stats = RunStats::default();
        self.history.clear();
        self.view = View::fresh(&self.input, status);
    }

    fn refresh_elapsed(&mut self) {
        let elapsed = self.clock.now().saturating_sub(self.started_at);
        self.stats.set_elapsed(elapsed);
    }

    fn present(&mut self) {
        let frame = Frame {
            algorithm: self.algorithm,
            state: self.state,
            view: &self.view,
            stats: &self.stats,
        };
        self.presenter.present(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingAudio, RecordingPresenter};
    use crate::stats::ManualClock;
    use sortviz_core::{elements_from_values, is_sorted_by_value};

    fn player(algorithm: Algorithm, values: &[u32]) -> Player {
        Player::new(algorithm, elements_from_values(values))
            .with_config(PlaybackConfig::instant())
            .with_clock(ManualClock::new())
    }

    #[test]
    fn starts_idle() {
        let p = player(Algorithm::Bubble, &[3, 1, 2]);
        assert_eq!(p.state(), PlaybackState::Idle);
        assert_eq!(p.view().status, STATUS_READY);
    }

    #[test]
    fn tick_before_start_is_idle() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        assert_eq!(p.tick(), Tick::Idle);
        assert_eq!(p.stats().total_ops(), 0);
    }

    #[test]
    fn run_completes_with_everything_finalized() {
        let mut p = player(Algorithm::Quick, &[5, 2, 8, 1, 9]);
        assert!(p.start());
        p.run_to_completion();
        assert_eq!(p.state(), PlaybackState::Completed);
        assert!(is_sorted_by_value(&p.view().snapshot));
        assert_eq!(p.view().finalized.len(), 5);
        assert!(p.view().comparing.is_empty() && p.view().swapping.is_empty());
        assert_eq!(p.view().status, STATUS_COMPLETE);
    }

    #[test]
    fn start_rejected_while_running() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        assert!(p.start());
        p.tick();
        let before = *p.stats();
        assert!(!p.start());
        assert_eq!(*p.stats(), before);
    }

    #[test]
    fn compare_sets_comparing_and_counts() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        p.start();
        assert_eq!(p.tick(), Tick::Applied(StepKind::Compare));
        assert_eq!(p.view().comparing, vec![0, 1]);
        assert!(p.view().swapping.is_empty());
        assert_eq!(p.stats().comparisons, 1);
        assert_eq!(p.view().source_line, Some(5));
    }

    #[test]
    fn exchange_sets_swapping_and_counts() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        p.start();
        p.tick();
        assert_eq!(p.tick(), Tick::Applied(StepKind::Exchange));
        assert_eq!(p.view().swapping, vec![0, 1]);
        assert!(p.view().comparing.is_empty());
        assert_eq!(p.stats().exchanges, 1);
        assert_eq!(p.view().snapshot[0].value, 1);
    }

    #[test]
    fn finalized_accumulates_and_clears_highlights() {
        let mut p = player(Algorithm::Selection, &[2, 1]);
        p.start();
        // compare, exchange, finalize(0)
        p.tick();
        p.tick();
        assert_eq!(p.tick(), Tick::Applied(StepKind::Finalized));
        assert!(p.view().is_finalized(0));
        assert!(p.view().comparing.is_empty() && p.view().swapping.is_empty());
    }

    #[test]
    fn pause_blocks_progress() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        p.start();
        assert!(p.pause());
        assert_eq!(p.tick(), Tick::Paused);
        assert_eq!(p.stats().total_ops(), 0);
        assert!(p.history().is_empty());
        assert!(p.resume());
        assert!(p.tick().advanced());
    }

    #[test]
    fn pause_and_resume_reject_wrong_states() {
        let mut p = player(Algorithm::Bubble, &[1]);
        assert!(!p.pause());
        assert!(!p.resume());
        p.start();
        assert!(!p.resume());
        assert!(p.toggle_pause());
        assert_eq!(p.state(), PlaybackState::Paused);
        assert!(p.toggle_pause());
        assert_eq!(p.state(), PlaybackState::Running);
    }

    #[test]
    fn step_forward_only_while_paused() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        assert!(!p.step_forward());
        p.start();
        assert!(!p.step_forward());
        p.pause();
        assert!(p.step_forward());
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.stats().comparisons, 1);
        assert_eq!(p.history().len(), 1);
    }

    #[test]
    fn step_forward_past_end_completes() {
        let mut p = player(Algorithm::Quick, &[1]);
        p.start();
        p.pause();
        assert!(p.step_forward());
        assert_eq!(p.state(), PlaybackState::Paused);
        assert!(p.step_forward());
        assert_eq!(p.state(), PlaybackState::Completed);
    }

    #[test]
    fn step_backward_restores_previous_display_only() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        p.start();
        p.pause();
        p.step_forward(); // compare(0,1)
        p.step_forward(); // exchange(0,1)
        let stats = *p.stats();
        assert!(p.step_backward());
        assert_eq!(p.view().comparing, vec![0, 1]);
        assert!(p.view().swapping.is_empty());
        assert_eq!(p.view().snapshot[0].value, 3);
        assert_eq!(p.view().rewound, 1);
        assert_eq!(*p.stats(), stats);
        assert!(!p.step_backward(), "one entry left");
    }

    #[test]
    fn forward_after_backward_continues_from_trace_position() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        p.start();
        p.pause();
        p.step_forward(); // compare(0,1)
        p.step_forward(); // exchange(0,1)
        p.step_backward();
        p.step_forward(); // compare(1,2), not exchange(0,1) again
        assert_eq!(p.view().comparing, vec![1, 2]);
        assert_eq!(p.view().rewound, 0);
        assert_eq!(p.stats().comparisons, 2);
        let kinds: Vec<_> = p.history().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![StepKind::Compare, StepKind::Compare]);
    }

    #[test]
    fn step_backward_rejected_while_running() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        p.start();
        p.tick();
        p.tick();
        assert!(!p.step_backward());
    }

    #[test]
    fn reset_rejected_while_running_accepted_while_paused() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        p.start();
        p.tick();
        assert!(!p.reset(elements_from_values(&[9])));
        p.pause();
        assert!(p.reset(elements_from_values(&[9, 8])));
        assert_eq!(p.state(), PlaybackState::Idle);
        assert_eq!(*p.stats(), RunStats::default());
        assert!(p.history().is_empty());
        assert_eq!(p.input().len(), 2);
    }

    #[test]
    fn restart_after_completion_resets_first() {
        let mut p = player(Algorithm::Heap, &[4, 2, 3, 1]);
        p.start();
        p.run_to_completion();
        let first = *p.stats();
        assert!(p.start());
        assert_eq!(p.stats().total_ops(), 0);
        assert!(p.view().finalized.is_empty());
        p.run_to_completion();
        assert_eq!(*p.stats(), first);
    }

    #[test]
    fn set_algorithm_rejected_while_running() {
        let mut p = player(Algorithm::Bubble, &[2, 1]);
        p.start();
        assert!(!p.set_algorithm(Algorithm::Merge));
        p.run_to_completion();
        assert!(p.set_algorithm(Algorithm::Merge));
        assert_eq!(p.algorithm(), Algorithm::Merge);
        assert_eq!(p.state(), PlaybackState::Idle);
    }

    #[test]
    fn set_algorithm_while_paused_discards_run() {
        let mut p = player(Algorithm::Bubble, &[3, 1, 2]);
        p.start();
        p.pause();
        p.step_forward();
        assert!(p.set_algorithm(Algorithm::Heap));
        assert_eq!(p.state(), PlaybackState::Idle);
        assert_eq!(p.stats().total_ops(), 0);
        assert!(p.history().is_empty());
    }

    #[test]
    fn history_is_bounded() {
        let values: Vec<u32> = (0..30).rev().collect();
        let mut p = Player::new(Algorithm::Bubble, elements_from_values(&values))
            .with_config(PlaybackConfig::instant().with_history_capacity(10))
            .with_clock(ManualClock::new());
        p.start();
        p.run_to_completion();
        assert_eq!(p.history().len(), 10);
    }

    #[test]
    fn elapsed_tracks_clock() {
        let clock = ManualClock::new();
        let mut p = player(Algorithm::Bubble, &[2, 1]).with_clock(clock.clone());
        p.start();
        clock.advance(Duration::from_secs(2));
        p.tick();
        p.tick();
        assert_eq!(p.stats().elapsed, Duration::from_secs(2));
        assert_eq!(p.stats().ops_per_sec, 1);
    }

    #[test]
    fn audio_receives_touched_values() {
        let audio = RecordingAudio::new();
        let mut p = Player::new(Algorithm::Bubble, elements_from_values(&[30, 10]))
            .with_config(PlaybackConfig::instant().with_sound(true))
            .with_clock(ManualClock::new())
            .with_audio(audio.clone());
        p.start();
        p.run_to_completion();
        let tones = audio.tones();
        assert_eq!(audio.init_calls(), 1);
        // compare(0,1) on [30,10], then exchange(0,1) on [10,30].
        assert_eq!(tones.len(), 4);
        assert_eq!((tones[0].value, tones[0].voice), (30, Voice::Sine));
        assert_eq!((tones[2].value, tones[2].voice), (10, Voice::Sawtooth));
        assert_eq!(tones[2].duration, Duration::from_millis(80));
    }

    #[test]
    fn muted_player_sends_no_tones() {
        let audio = RecordingAudio::new();
        let mut p = player(Algorithm::Bubble, &[30, 10]).with_audio(audio.clone());
        p.start();
        p.run_to_completion();
        assert!(audio.tones().is_empty());
    }

    #[test]
    fn tone_lengths_follow_config() {
        let audio = RecordingAudio::new();
        let config = PlaybackConfig::instant()
            .with_sound(true)
            .with_tones(Duration::from_millis(5), Duration::from_millis(9));
        let mut p = Player::new(Algorithm::Bubble, elements_from_values(&[30, 10]))
            .with_config(config)
            .with_clock(ManualClock::new())
            .with_audio(audio.clone());
        p.start();
        p.run_to_completion();
        let lengths: Vec<_> = audio.tones().iter().map(|t| t.duration.as_millis()).collect();
        assert_eq!(lengths, [5, 5, 9, 9]);
    }

    #[test]
    fn presenter_sees_every_applied_event() {
        let presenter = RecordingPresenter::new();
        let mut p = player(Algorithm::Insertion, &[2, 1, 3]).with_presenter(presenter.clone());
        p.start();
        let applied = p.run_to_completion();
        // start frame + one per event + completion frame
        assert_eq!(presenter.len(), applied + 2);
        let last = presenter.last().unwrap();
        assert_eq!(last.state, PlaybackState::Completed);
        assert_eq!(last.finalized, vec![0, 1, 2]);
    }

    #[test]
    fn empty_input_completes_on_first_tick() {
        let mut p = player(Algorithm::Merge, &[]);
        p.start();
        assert_eq!(p.tick(), Tick::Completed);
        assert!(p.is_completed());
    }
}
