#![forbid(unsafe_code)]

//! Command-line front end for sortviz.
//!
//! # Key Components
//!
//! - [`cli`] - `list`, `run` and `compare` subcommands and dispatch
//! - [`render`] - Text and JSON-lines presentation sinks, logged tones
//! - [`interactive`] - Single-key playback commands read from stdin
//! - [`logging`] - `SORTVIZ_LOG` filter and stderr subscriber
//! - [`SortvizError`] - Error type carrying the process exit code

pub mod cli;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod render;

pub use cli::run_from_env;
pub use error::{Result, SortvizError};
