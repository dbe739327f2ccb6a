#![forbid(unsafe_code)]

//! Threaded pull loop.
//!
//! [`spawn`] moves a [`Playable`] onto a background thread that repeatedly
//! ticks it and waits for its delay. Controls reach the loop through an
//! `mpsc` channel and are only ever applied between two ticks, never in the
//! middle of one.
//!
//! # Loop shape
//!
//! ```text
//! ┌─▶ drain pending controls ── shutdown? ─▶ return playable
//! │          │
//! │     not running ─▶ block on channel ─┐
//! │          │                           │
//! │        tick()                        │
//! │          │                           │
//! │   wait delay (recv_timeout,          │
//! │   controls applied as they arrive)   │
//! └──────────┴───────────────────────────┘
//! ```
//!
//! While nothing is running the loop parks on the channel, so an idle or
//! paused player costs no CPU.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use sortviz_core::{Algorithm, Element};
use web_time::{Duration, Instant};

use crate::dual::{DualPlayer, Side};
use crate::player::Player;

/// A request from the controlling side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Start,
    Pause,
    Resume,
    TogglePause,
    StepForward,
    StepBackward,
    SetSpeed(Duration),
    SetSound(bool),
    Reset(Vec<Element>),
    SetAlgorithm(Algorithm),
    /// Pick the algorithm for one side of a comparison. Ignored by a
    /// single player.
    Select(Side, Algorithm),
}

/// Something the pull loop can drive.
pub trait Playable: Send + 'static {
    /// Apply one control. Returns whether it was accepted.
    fn control(&mut self, control: Control) -> bool;

    /// One loop body. Returns whether anything advanced.
    fn tick(&mut self) -> bool;

    fn delay(&self) -> Duration;

    fn is_running(&self) -> bool;
}

impl Playable for Player {
    fn control(&mut self, control: Control) -> bool {
        match control {
            Control::Start => self.start(),
            Control::Pause => self.pause(),
            Control::Resume => self.resume(),
            Control::TogglePause => self.toggle_pause(),
            Control::StepForward => self.step_forward(),
            Control::StepBackward => self.step_backward(),
            Control::SetSpeed(delay) => {
                self.set_speed(delay);
                true
            }
            Control::SetSound(sound) => {
                self.set_sound(sound);
                true
            }
            Control::Reset(input) => self.reset(input),
            Control::SetAlgorithm(algorithm) => self.set_algorithm(algorithm),
            Control::Select(..) => false,
        }
    }

    fn tick(&mut self) -> bool {
        Player::tick(self).advanced()
    }

    fn delay(&self) -> Duration {
        Player::delay(self)
    }

    fn is_running(&self) -> bool {
        Player::is_running(self)
    }
}

impl Playable for DualPlayer {
    fn control(&mut self, control: Control) -> bool {
        match control {
            Control::Start => self.start(),
            Control::Pause => self.pause(),
            Control::Resume => self.resume(),
            Control::TogglePause => self.toggle_pause(),
            Control::StepForward => self.step_forward(),
            Control::StepBackward => self.step_backward(),
            Control::SetSpeed(delay) => {
                self.set_speed(delay);
                true
            }
            Control::SetSound(sound) => {
                self.set_sound(sound);
                true
            }
            Control::Reset(input) => self.reset(input),
            Control::SetAlgorithm(algorithm) => self.select_both(algorithm),
            Control::Select(side, algorithm) => self.select(side, algorithm),
        }
    }

    fn tick(&mut self) -> bool {
        DualPlayer::tick(self).advanced()
    }

    fn delay(&self) -> Duration {
        DualPlayer::delay(self)
    }

    fn is_running(&self) -> bool {
        DualPlayer::is_running(self)
    }
}

enum Message {
    Control(Control),
    Shutdown,
}

#[derive(Debug, Default)]
struct Progress {
    /// Controls taken off the channel so far.
    handled: u64,
    running: bool,
    stopped: bool,
}

#[derive(Debug, Default)]
struct Shared {
    sent: AtomicU64,
    progress: Mutex<Progress>,
    cvar: Condvar,
}

impl Shared {
    fn update(&self, f: impl FnOnce(&mut Progress)) {
        let mut progress = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut progress);
        self.cvar.notify_all();
    }

    /// Every sent control handled and nothing running, or the loop is gone.
    fn settled(&self, progress: &Progress) -> bool {
        progress.stopped
            || (!progress.running && progress.handled >= self.sent.load(Ordering::Acquire))
    }
}

/// Cloneable sending half of a running loop.
#[derive(Clone)]
pub struct ControlSender {
    tx: Sender<Message>,
    shared: Arc<Shared>,
}

impl fmt::Debug for ControlSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlSender")
            .field("sent", &self.shared.sent.load(Ordering::Relaxed))
            .finish()
    }
}

impl ControlSender {
    /// Queue a control. Returns `false` if the loop has already stopped.
    pub fn send(&self, control: Control) -> bool {
        self.shared.sent.fetch_add(1, Ordering::AcqRel);
        if self.tx.send(Message::Control(control)).is_ok() {
            return true;
        }
        self.shared.sent.fetch_sub(1, Ordering::AcqRel);
        false
    }
}

/// Asks the loop to stop when the owning handle goes away.
struct StopOnDrop(Sender<Message>);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        // Don't join in drop; the loop exits on its next channel read.
        let _ = self.0.send(Message::Shutdown);
    }
}

/// Handle to a playable running on its own thread.
pub struct PlaybackHandle<T: Playable> {
    sender: ControlSender,
    thread: thread::JoinHandle<T>,
    stop: StopOnDrop,
}

impl<T: Playable> fmt::Debug for PlaybackHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackHandle")
            .field("sender", &self.sender)
            .field("alive", &!self.thread.is_finished())
            .finish()
    }
}

/// Run `playable` on a background thread named `sortviz-playback`.
pub fn spawn<T: Playable>(playable: T) -> io::Result<PlaybackHandle<T>> {
    let (tx, rx) = mpsc::channel();
    let shared = Arc::new(Shared::default());
    shared.update(|p| p.running = playable.is_running());
    let loop_shared = Arc::clone(&shared);
    let thread = thread::Builder::new()
        .name("sortviz-playback".to_string())
        .spawn(move || run(playable, &rx, &loop_shared))?;
    tracing::debug!("playback thread started");
    Ok(PlaybackHandle {
        stop: StopOnDrop(tx.clone()),
        sender: ControlSender { tx, shared },
        thread,
    })
}

impl<T: Playable> PlaybackHandle<T> {
    pub fn send(&self, control: Control) -> bool {
        self.sender.send(control)
    }

    #[must_use]
    pub fn sender(&self) -> ControlSender {
        self.sender.clone()
    }

    pub fn start(&self) -> bool {
        self.send(Control::Start)
    }

    pub fn pause(&self) -> bool {
        self.send(Control::Pause)
    }

    pub fn resume(&self) -> bool {
        self.send(Control::Resume)
    }

    pub fn step_forward(&self) -> bool {
        self.send(Control::StepForward)
    }

    pub fn step_backward(&self) -> bool {
        self.send(Control::StepBackward)
    }

    pub fn set_speed(&self, delay: Duration) -> bool {
        self.send(Control::SetSpeed(delay))
    }

    pub fn reset(&self, input: Vec<Element>) -> bool {
        self.send(Control::Reset(input))
    }

    /// Block until every control sent so far has been handled and the
    /// playable is no longer running (idle, paused, or completed).
    pub fn wait_idle(&self) {
        let shared = &self.sender.shared;
        let progress = shared.progress.lock().unwrap_or_else(|e| e.into_inner());
        let _settled = shared
            .cvar
            .wait_while(progress, |p| !shared.settled(p))
            .unwrap_or_else(|e| e.into_inner());
    }

    /// Like [`wait_idle`](Self::wait_idle), giving up after `timeout`.
    /// Returns whether the loop settled.
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        let shared = &self.sender.shared;
        let progress = shared.progress.lock().unwrap_or_else(|e| e.into_inner());
        let (progress, _) = shared
            .cvar
            .wait_timeout_while(progress, timeout, |p| !shared.settled(p))
            .unwrap_or_else(|e| e.into_inner());
        shared.settled(&progress)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        let progress = self
            .sender
            .shared
            .progress
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        progress.running
    }

    /// Stop the loop between two ticks and take the playable back.
    pub fn shutdown(self) -> T {
        let Self { thread, stop, .. } = self;
        drop(stop);
        match thread.join() {
            Ok(playable) => playable,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Outcome of handling one channel read.
enum Flow {
    Continue,
    Stop,
}

fn handle<T: Playable>(playable: &mut T, message: Message, shared: &Shared) -> Flow {
    match message {
        Message::Shutdown => Flow::Stop,
        Message::Control(control) => {
            tracing::trace!(?control, "control received");
            let accepted = playable.control(control);
            if !accepted {
                tracing::trace!("control ignored");
            }
            shared.update(|p| {
                p.handled += 1;
                p.running = playable.is_running();
            });
            Flow::Continue
        }
    }
}

fn run<T: Playable>(mut playable: T, rx: &Receiver<Message>, shared: &Shared) -> T {
    'outer: loop {
        // Cancellation point: controls are only applied between ticks.
        loop {
            match rx.try_recv() {
                Ok(message) => {
                    if let Flow::Stop = handle(&mut playable, message, shared) {
                        break 'outer;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break 'outer,
            }
        }

        if !playable.is_running() {
            match rx.recv() {
                Ok(message) => {
                    if let Flow::Stop = handle(&mut playable, message, shared) {
                        break 'outer;
                    }
                    continue;
                }
                Err(_) => break 'outer,
            }
        }

        playable.tick();
        shared.update(|p| p.running = playable.is_running());

        let delay = playable.delay();
        if delay.is_zero() || !playable.is_running() {
            continue;
        }
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match rx.recv_timeout(remaining) {
                Ok(message) => {
                    if let Flow::Stop = handle(&mut playable, message, shared) {
                        break 'outer;
                    }
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => break 'outer,
            }
        }
    }

    shared.update(|p| {
        p.running = false;
        p.stopped = true;
    });
    tracing::debug!("playback thread stopped");
    playable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaybackConfig;
    use crate::player::PlaybackState;
    use crate::sink::RecordingPresenter;
    use crate::stats::ManualClock;
    use sortviz_core::{elements_from_values, is_sorted_by_value};

    const WAIT: Duration = Duration::from_secs(10);

    fn player(values: &[u32]) -> Player {
        Player::new(Algorithm::Bubble, elements_from_values(values))
            .with_config(PlaybackConfig::instant())
            .with_clock(ManualClock::new())
    }

    #[test]
    fn runs_to_completion_on_background_thread() {
        let handle = spawn(player(&[5, 3, 4, 1, 2])).unwrap();
        assert!(handle.start());
        assert!(handle.wait_idle_timeout(WAIT));
        let player = handle.shutdown();
        assert_eq!(player.state(), PlaybackState::Completed);
        assert!(is_sorted_by_value(&player.view().snapshot));
    }

    #[test]
    fn idle_loop_settles_without_controls() {
        let handle = spawn(player(&[2, 1])).unwrap();
        assert!(handle.wait_idle_timeout(WAIT));
        assert!(!handle.is_running());
        assert_eq!(handle.shutdown().state(), PlaybackState::Idle);
    }

    #[test]
    fn paused_loop_steps_on_request() {
        let slow = player(&[3, 1, 2]).with_config(
            PlaybackConfig::instant().with_delay(Duration::from_secs(60)),
        );
        let handle = spawn(slow).unwrap();
        handle.start();
        handle.pause();
        assert!(handle.wait_idle_timeout(WAIT));
        handle.step_forward();
        handle.step_forward();
        assert!(handle.wait_idle_timeout(WAIT));
        let player = handle.shutdown();
        assert_eq!(player.state(), PlaybackState::Paused);
        // One tick may have happened before the pause arrived.
        let applied = player.history().len();
        assert!((2..=3).contains(&applied), "applied {applied}");
    }

    #[test]
    fn control_during_wait_is_handled_promptly() {
        let slow = player(&[3, 1, 2]).with_config(
            PlaybackConfig::instant().with_delay(Duration::from_secs(60)),
        );
        let handle = spawn(slow).unwrap();
        handle.start();
        handle.pause();
        // Would take a minute if the pause waited for the delay to elapse.
        assert!(handle.wait_idle_timeout(WAIT));
        assert!(!handle.is_running());
    }

    #[test]
    fn speed_change_applies_from_next_wait() {
        let presenter = RecordingPresenter::new();
        let slow = player(&[6, 5, 4, 3, 2, 1])
            .with_config(PlaybackConfig::instant().with_delay(Duration::from_millis(400)))
            .with_presenter(presenter.clone());
        let begun = Instant::now();
        let handle = spawn(slow).unwrap();
        handle.start();
        thread::sleep(Duration::from_millis(50));
        handle.set_speed(Duration::ZERO);
        thread::sleep(Duration::from_millis(100));
        // Still inside the first wait.
        let mid_wait = presenter.frames();

        assert!(handle.wait_idle_timeout(WAIT));
        let elapsed = begun.elapsed();
        let player = handle.shutdown();
        assert_eq!(player.state(), PlaybackState::Completed);
        assert!(mid_wait.iter().all(|f| f.stats.total_ops() <= 1));
        assert!(mid_wait.len() < presenter.len());
        // The wait in progress is honoured; later ones use the new delay.
        assert!(elapsed >= Duration::from_millis(400), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(5), "elapsed {elapsed:?}");
    }

    #[test]
    fn dual_selection_applies_to_both_sides_or_neither() {
        let dual = DualPlayer::over(
            Algorithm::Quick,
            Algorithm::Bubble,
            elements_from_values(&[4, 3, 2, 1]),
            PlaybackConfig::instant().with_delay(Duration::from_secs(60)),
        );
        let handle = spawn(dual).unwrap();
        handle.start();
        handle.pause();
        handle.send(Control::SetAlgorithm(Algorithm::Heap));
        assert!(handle.wait_idle_timeout(WAIT));
        let dual = handle.shutdown();
        assert_eq!(dual.side(Side::Left).algorithm(), Algorithm::Quick);
        assert_eq!(dual.side(Side::Right).algorithm(), Algorithm::Bubble);
        assert_eq!(dual.state(), PlaybackState::Paused);
    }

    #[test]
    fn dual_player_runs_through_driver() {
        let dual = DualPlayer::over(
            Algorithm::Quick,
            Algorithm::Heap,
            elements_from_values(&[9, 4, 7, 1, 3]),
            PlaybackConfig::instant(),
        );
        let handle = spawn(dual).unwrap();
        handle.send(Control::Select(Side::Right, Algorithm::Merge));
        handle.start();
        assert!(handle.wait_idle_timeout(WAIT));
        let dual = handle.shutdown();
        assert!(dual.is_finished());
        assert_eq!(dual.side(Side::Right).algorithm(), Algorithm::Merge);
    }

    #[test]
    fn dropped_handle_stops_thread() {
        let handle = spawn(player(&[2, 1])).unwrap();
        let sender = handle.sender();
        drop(handle);
        // The loop exits once it sees the shutdown; later sends fail.
        let deadline = Instant::now() + WAIT;
        while sender.send(Control::Start) {
            assert!(Instant::now() < deadline, "loop never stopped");
            thread::yield_now();
        }
    }
}
