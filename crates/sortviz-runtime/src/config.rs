#![forbid(unsafe_code)]

//! Playback configuration.

use web_time::Duration;

/// Configuration for a [`Player`](crate::Player).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Wait between two applied events while running.
    pub delay: Duration,
    /// Number of applied events retained for stepping backward.
    pub history_capacity: usize,
    /// Forward touched values to the audio sink.
    pub sound: bool,
    /// Tone length for compare events.
    pub compare_tone: Duration,
    /// Tone length for exchange events.
    pub exchange_tone: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(50),
            history_capacity: 100,
            sound: true,
            compare_tone: Duration::from_millis(50),
            exchange_tone: Duration::from_millis(80),
        }
    }
}

impl PlaybackConfig {
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the history capacity. A capacity of 0 is clamped to 1.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    #[must_use]
    pub fn with_tones(mut self, compare: Duration, exchange: Duration) -> Self {
        self.compare_tone = compare;
        self.exchange_tone = exchange;
        self
    }

    /// No waiting and no sound; for headless runs.
    #[must_use]
    pub fn instant() -> Self {
        Self::default()
            .with_delay(Duration::ZERO)
            .with_sound(false)
    }
}
