#![forbid(unsafe_code)]

//! Presentation and audio sinks.
//!
//! Sinks are the only outputs of a player. They receive borrowed, read-only
//! views of player state and cannot mutate the working array or highlights.
//!
//! The recording sinks keep their output behind a shared handle, so a clone
//! kept by the caller can inspect what a player emitted after the other clone
//! was moved into it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sortviz_core::{Algorithm, Element};
use web_time::Duration;

use crate::player::{PlaybackState, View};
use crate::stats::RunStats;

/// Everything a presentation needs for one applied event.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub algorithm: Algorithm,
    pub state: PlaybackState,
    pub view: &'a View,
    pub stats: &'a RunStats,
}

/// Renders array state and highlights.
pub trait PresentationSink: Send {
    fn present(&mut self, frame: &Frame<'_>);
}

impl<F> PresentationSink for F
where
    F: FnMut(&Frame<'_>) + Send,
{
    fn present(&mut self, frame: &Frame<'_>) {
        self(frame);
    }
}

/// Oscillator shape hint for a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Voice {
    /// Used for comparisons.
    Sine,
    /// Used for exchanges.
    Sawtooth,
}

/// One value to sound, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tone {
    pub value: u32,
    pub duration: Duration,
    pub voice: Voice,
}

/// Turns values into tones. Synthesis is up to the implementation.
pub trait AudioSink: Send {
    /// Prepare output. Called on every start; must be idempotent.
    fn init(&mut self) {}

    fn play(&mut self, tone: Tone);
}

/// Linear value-to-frequency mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMap {
    pub min_freq: f32,
    pub max_freq: f32,
    pub min_value: u32,
    pub max_value: u32,
}

impl Default for ToneMap {
    fn default() -> Self {
        Self {
            min_freq: 200.0,
            max_freq: 1000.0,
            min_value: 0,
            max_value: 100,
        }
    }
}

impl ToneMap {
    /// Frequency in Hz for `value`.
    #[must_use]
    pub fn frequency(&self, value: u32) -> f32 {
        let span = self.max_value.saturating_sub(self.min_value).max(1) as f32;
        self.min_freq + (value as f32 / span) * (self.max_freq - self.min_freq)
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl PresentationSink for NullPresenter {
    fn present(&mut self, _frame: &Frame<'_>) {}
}

/// Discards every tone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _tone: Tone) {}
}

/// Owned copy of a presented frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    pub algorithm: Algorithm,
    pub state: PlaybackState,
    pub array: Vec<Element>,
    pub comparing: Vec<usize>,
    pub swapping: Vec<usize>,
    pub finalized: Vec<usize>,
    pub source_line: Option<u32>,
    pub status: String,
    pub stats: RunStats,
}

impl FrameRecord {
    #[must_use]
    pub fn capture(frame: &Frame<'_>) -> Self {
        Self {
            algorithm: frame.algorithm,
            state: frame.state,
            array: frame.view.snapshot.to_vec(),
            comparing: frame.view.comparing.clone(),
            swapping: frame.view.swapping.clone(),
            finalized: frame.view.finalized.iter().copied().collect(),
            source_line: frame.view.source_line,
            status: frame.view.status.clone(),
            stats: *frame.stats,
        }
    }

    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.array.iter().map(|e| e.value).collect()
    }
}

/// Keeps a copy of every presented frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    frames: Arc<Mutex<Vec<FrameRecord>>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames(&self) -> Vec<FrameRecord> {
        self.frames
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<FrameRecord> {
        self.frames
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PresentationSink for RecordingPresenter {
    fn present(&mut self, frame: &Frame<'_>) {
        self.frames
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(FrameRecord::capture(frame));
    }
}

/// Keeps every tone and counts `init` calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    tones: Arc<Mutex<Vec<Tone>>>,
    inits: Arc<AtomicUsize>,
}

impl RecordingAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tones(&self) -> Vec<Tone> {
        self.tones.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    #[must_use]
    pub fn init_calls(&self) -> usize {
        self.inits.load(Ordering::Relaxed)
    }
}

impl AudioSink for RecordingAudio {
    fn init(&mut self) {
        self.inits.fetch_add(1, Ordering::Relaxed);
    }

    fn play(&mut self, tone: Tone) {
        self.tones
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tone);
    }
}
