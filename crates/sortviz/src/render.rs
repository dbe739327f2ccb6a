//! Terminal presentation and audio sinks.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use sortviz_runtime::{AudioSink, Frame, PlaybackState, PresentationSink, RunStats, Tone, ToneMap};

/// Output stream shared between presenters and the final summary.
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedWriter {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl std::fmt::Debug for SharedWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedWriter").finish_non_exhaustive()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .flush()
    }
}

/// Writes one line per frame. Stops writing after the first I/O error.
#[derive(Debug)]
struct LineSink {
    out: SharedWriter,
    broken: bool,
}

impl LineSink {
    fn emit(&mut self, line: &str) {
        if self.broken {
            return;
        }
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::warn!(%err, "frame output failed; dropping further frames");
            self.broken = true;
        }
    }
}

// ============================================================================
// Text
// ============================================================================

/// Human readable frames:
///
/// ```text
/// [left  bubble-sort running  ] cmp=3    exch=1    | 3 5 [4] [1] 2 | Comparing indices 2 & 3
/// ```
#[derive(Debug)]
pub struct TextPresenter {
    label: Option<&'static str>,
    sink: LineSink,
}

impl TextPresenter {
    #[must_use]
    pub fn new(out: SharedWriter) -> Self {
        Self {
            label: None,
            sink: LineSink { out, broken: false },
        }
    }

    /// Prefix every line with `label`, e.g. the side of a comparison.
    #[must_use]
    pub fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}

/// Render one frame as a single text line.
#[must_use]
pub fn format_frame(frame: &Frame<'_>, label: Option<&str>) -> String {
    let view = frame.view;
    let mut line = String::from("[");
    if let Some(label) = label {
        let _ = write!(line, "{label:<5} ");
    }
    let _ = write!(
        line,
        "{} {:<9}] cmp={:<4} exch={:<4} |",
        frame.algorithm.id(),
        frame.state.as_str(),
        frame.stats.comparisons,
        frame.stats.exchanges,
    );
    for (idx, element) in view.snapshot.iter().enumerate() {
        if view.comparing.contains(&idx) {
            let _ = write!(line, " [{}]", element.value);
        } else if view.swapping.contains(&idx) {
            let _ = write!(line, " <{}>", element.value);
        } else if view.is_finalized(idx) {
            let _ = write!(line, " {}*", element.value);
        } else {
            let _ = write!(line, " {}", element.value);
        }
    }
    let _ = write!(line, " | {}", view.status);
    line
}

impl PresentationSink for TextPresenter {
    fn present(&mut self, frame: &Frame<'_>) {
        let line = format_frame(frame, self.label);
        self.sink.emit(&line);
    }
}

// ============================================================================
// JSON lines
// ============================================================================

#[derive(Debug, Serialize)]
struct FrameLine<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<&'a str>,
    algorithm: &'a str,
    state: PlaybackState,
    values: Vec<u32>,
    comparing: &'a [usize],
    swapping: &'a [usize],
    finalized: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_line: Option<u32>,
    status: &'a str,
    stats: &'a RunStats,
}

/// One JSON object per frame.
#[derive(Debug)]
pub struct JsonPresenter {
    label: Option<&'static str>,
    sink: LineSink,
}

impl JsonPresenter {
    #[must_use]
    pub fn new(out: SharedWriter) -> Self {
        Self {
            label: None,
            sink: LineSink { out, broken: false },
        }
    }

    #[must_use]
    pub fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}

/// Render one frame as a JSON object.
pub fn frame_json(frame: &Frame<'_>, label: Option<&str>) -> serde_json::Result<String> {
    let view = frame.view;
    serde_json::to_string(&FrameLine {
        side: label,
        algorithm: frame.algorithm.id(),
        state: frame.state,
        values: view.snapshot.iter().map(|e| e.value).collect(),
        comparing: &view.comparing,
        swapping: &view.swapping,
        finalized: view.finalized.iter().copied().collect(),
        source_line: view.source_line,
        status: &view.status,
        stats: frame.stats,
    })
}

impl PresentationSink for JsonPresenter {
    fn present(&mut self, frame: &Frame<'_>) {
        match frame_json(frame, self.label) {
            Ok(line) => self.sink.emit(&line),
            Err(err) => tracing::warn!(%err, "failed to encode frame"),
        }
    }
}

// ============================================================================
// Format selection
// ============================================================================

/// Frame output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Presenter chosen at runtime from [`OutputFormat`].
#[derive(Debug)]
pub enum Presenter {
    Text(TextPresenter),
    Json(JsonPresenter),
}

impl Presenter {
    #[must_use]
    pub fn new(format: OutputFormat, out: SharedWriter, label: Option<&'static str>) -> Self {
        match (format, label) {
            (OutputFormat::Text, None) => Self::Text(TextPresenter::new(out)),
            (OutputFormat::Text, Some(label)) => Self::Text(TextPresenter::new(out).labelled(label)),
            (OutputFormat::Json, None) => Self::Json(JsonPresenter::new(out)),
            (OutputFormat::Json, Some(label)) => Self::Json(JsonPresenter::new(out).labelled(label)),
        }
    }
}

impl PresentationSink for Presenter {
    fn present(&mut self, frame: &Frame<'_>) {
        match self {
            Self::Text(p) => p.present(frame),
            Self::Json(p) => p.present(frame),
        }
    }
}

// ============================================================================
// Audio
// ============================================================================

/// Audio sink for terminals: logs the tone that would be played.
#[derive(Debug, Default)]
pub struct ToneLog {
    map: ToneMap,
    initialized: bool,
}

impl AudioSink for ToneLog {
    fn init(&mut self) {
        if !self.initialized {
            self.initialized = true;
            tracing::debug!(
                min_freq = self.map.min_freq,
                max_freq = self.map.max_freq,
                "tone output ready"
            );
        }
    }

    fn play(&mut self, tone: Tone) {
        tracing::trace!(
            value = tone.value,
            freq = self.map.frequency(tone.value),
            duration_ms = tone.duration.as_millis() as u64,
            voice = ?tone.voice,
            "tone"
        );
    }
}
