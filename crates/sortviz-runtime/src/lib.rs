#![forbid(unsafe_code)]

//! Sortviz runtime: paced playback of sorting traces.
//!
//! # Key Components
//!
//! - [`Player`] - Playback controller for one algorithm over one array
//! - [`DualPlayer`] - Two players advanced in lockstep for comparison
//! - [`spawn`] / [`PlaybackHandle`] - Pull loop on a background thread
//! - [`PresentationSink`] / [`AudioSink`] - Read-only outputs of a player
//! - [`PlaybackHistory`] - Bounded record of applied events for stepping back
//! - [`RunStats`] - Comparison and exchange counters with elapsed time
//!
//! # Role in sortviz
//! `sortviz-runtime` sits between `sortviz-core`, which only produces
//! events, and whatever presents them. A player pulls one event at a time,
//! updates its view and statistics, and hands a [`Frame`] to its
//! presentation sink. Waiting between events is the host's job: either the
//! threaded [`driver`] or a caller ticking the player directly.

pub mod config;
pub mod driver;
pub mod dual;
pub mod history;
pub mod player;
pub mod sink;
pub mod stats;

pub use config::PlaybackConfig;
pub use driver::{Control, ControlSender, Playable, PlaybackHandle, spawn};
pub use dual::{DualPlayer, DualTick, Side};
pub use history::PlaybackHistory;
pub use player::{PlaybackState, Player, Tick, View};
pub use sink::{
    AudioSink, Frame, FrameRecord, NullAudio, NullPresenter, PresentationSink, RecordingAudio,
    RecordingPresenter, Tone, ToneMap, Voice,
};
pub use stats::{Clock, ManualClock, RunStats, SystemClock};
