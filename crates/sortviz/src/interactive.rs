//! Line-based playback control from stdin.
//!
//! | Key | Action                          |
//! |-----|---------------------------------|
//! | `s` | start (or restart once done)    |
//! | `p` | pause                           |
//! | `r` | resume                          |
//! | `n` | step forward (paused)           |
//! | `b` | step back (paused)              |
//! | `+` | faster: 10 ms less delay        |
//! | `-` | slower: 10 ms more delay        |
//! | `x` | new random array (not running)  |
//! | `q` | quit                            |

use std::io::BufRead;

use sortviz_core::ArrayGenerator;
use sortviz_runtime::{Control, ControlSender};
use web_time::Duration;

use crate::error::Result;

pub const SPEED_STEP: Duration = Duration::from_millis(10);
pub const MIN_DELAY: Duration = Duration::from_millis(10);
pub const MAX_DELAY: Duration = Duration::from_millis(400);

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    StepForward,
    StepBackward,
    Faster,
    Slower,
    NewArray,
    Quit,
}

impl Command {
    /// Parse a trimmed input line. Unknown input yields `None`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "s" => Some(Self::Start),
            "p" => Some(Self::Pause),
            "r" => Some(Self::Resume),
            "n" => Some(Self::StepForward),
            "b" => Some(Self::StepBackward),
            "+" => Some(Self::Faster),
            "-" => Some(Self::Slower),
            "x" => Some(Self::NewArray),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    EndOfInput,
}

/// Delay after one `+`. Never drops below [`MIN_DELAY`] unless it already was.
#[must_use]
pub fn faster(delay: Duration) -> Duration {
    if delay <= MIN_DELAY {
        delay
    } else {
        delay.saturating_sub(SPEED_STEP).max(MIN_DELAY)
    }
}

/// Delay after one `-`. Never rises above [`MAX_DELAY`] unless it already was.
#[must_use]
pub fn slower(delay: Duration) -> Duration {
    if delay >= MAX_DELAY {
        delay
    } else {
        (delay + SPEED_STEP).min(MAX_DELAY)
    }
}

/// Translate input lines into controls until `q` or end of input.
pub fn session(
    input: impl BufRead,
    sender: &ControlSender,
    mut delay: Duration,
    generator: &mut ArrayGenerator,
) -> Result<SessionEnd> {
    for line in input.lines() {
        let line = line?;
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                eprintln!("unknown command {:?} (s p r n b + - x q)", line.trim());
            }
            continue;
        };
        let control = match command {
            Command::Quit => return Ok(SessionEnd::Quit),
            Command::Start => Control::Start,
            Command::Pause => Control::Pause,
            Command::Resume => Control::Resume,
            Command::StepForward => Control::StepForward,
            Command::StepBackward => Control::StepBackward,
            Command::Faster => {
                delay = faster(delay);
                Control::SetSpeed(delay)
            }
            Command::Slower => {
                delay = slower(delay);
                Control::SetSpeed(delay)
            }
            Command::NewArray => Control::Reset(generator.generate()),
        };
        tracing::debug!(?command, "interactive command");
        if !sender.send(control) {
            return Ok(SessionEnd::Quit);
        }
    }
    Ok(SessionEnd::EndOfInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_known_keys() {
        assert_eq!(Command::parse("p"), Some(Command::Pause));
        assert_eq!(Command::parse(" n \n"), Some(Command::StepForward));
        assert_eq!(Command::parse("+"), Some(Command::Faster));
        assert_eq!(Command::parse("pause"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn speed_steps_are_clamped() {
        assert_eq!(faster(Duration::from_millis(50)), Duration::from_millis(40));
        assert_eq!(faster(Duration::from_millis(15)), MIN_DELAY);
        assert_eq!(faster(Duration::from_millis(10)), MIN_DELAY);
        assert_eq!(faster(Duration::ZERO), Duration::ZERO);
        assert_eq!(slower(Duration::from_millis(395)), MAX_DELAY);
        assert_eq!(slower(Duration::from_secs(1)), Duration::from_secs(1));
        assert_eq!(slower(Duration::ZERO), SPEED_STEP);
    }

    proptest! {
        #[test]
        fn speed_steps_stay_in_range(ms in 10u64..=400) {
            let delay = Duration::from_millis(ms);
            prop_assert!((MIN_DELAY..=MAX_DELAY).contains(&faster(delay)));
            prop_assert!((MIN_DELAY..=MAX_DELAY).contains(&slower(delay)));
        }

        #[test]
        fn slower_then_faster_round_trips(ms in 10u64..=390) {
            let delay = Duration::from_millis(ms);
            prop_assert_eq!(faster(slower(delay)), delay);
        }
    }
}
