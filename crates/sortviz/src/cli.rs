use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sortviz_core::{Algorithm, ArrayConfig, ArrayGenerator, Element};
use sortviz_runtime::{
    DualPlayer, Playable, PlaybackConfig, PlaybackState, Player, RunStats, Side, spawn,
};
use web_time::Duration;

use crate::error::{Result, SortvizError};
use crate::interactive::{self, SessionEnd};
use crate::logging;
use crate::render::{OutputFormat, Presenter, SharedWriter, ToneLog};

/// Largest array the CLI will generate.
pub const MAX_SIZE: usize = 10_000;

#[derive(Debug, Parser)]
#[command(
    name = "sortviz",
    about = "Step-by-step sorting algorithm player",
    version
)]
pub struct Cli {
    /// Log state transitions to stderr (overridden by SORTVIZ_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print algorithm identifiers.
    List,

    /// Play one algorithm over a random array.
    Run(RunArgs),

    /// Play two algorithms side by side over the same random array.
    Compare(CompareArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Algorithm identifier, e.g. `quick-sort` or `quick`.
    pub algorithm: String,

    #[command(flatten)]
    pub playback: PlaybackArgs,
}

#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    pub left: String,

    pub right: String,

    #[command(flatten)]
    pub playback: PlaybackArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PlaybackArgs {
    /// Number of elements (default 20 for run, 30 for compare).
    #[arg(long)]
    pub size: Option<usize>,

    /// Delay between events in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 50)]
    pub speed: u64,

    /// Seed for the random array.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not emit tones.
    #[arg(long)]
    pub mute: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Read playback commands from stdin.
    #[arg(long)]
    pub interactive: bool,

    /// Events kept for stepping back.
    #[arg(long, default_value_t = 100)]
    pub history: usize,
}

impl PlaybackArgs {
    pub fn config(&self) -> PlaybackConfig {
        PlaybackConfig::default()
            .with_delay(Duration::from_millis(self.speed))
            .with_history_capacity(self.history)
            .with_sound(!self.mute)
    }

    /// Generator over `base` with the requested size and seed.
    pub fn generator(&self, base: ArrayConfig) -> Result<ArrayGenerator> {
        let size = self.size.unwrap_or(base.size);
        if size > MAX_SIZE {
            return Err(SortvizError::invalid(format!(
                "--size {size} exceeds the maximum of {MAX_SIZE}"
            )));
        }
        let config = base.with_size(size);
        Ok(match self.seed {
            Some(seed) => ArrayGenerator::seeded(config, seed),
            None => ArrayGenerator::new(config),
        })
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdin = io::stdin();
    run_with(cli, SharedWriter::stdout(), stdin.lock())
}

/// Dispatch with explicit output and command input.
pub fn run_with(cli: Cli, out: SharedWriter, input: impl BufRead) -> Result<()> {
    match cli.command {
        Commands::List => print_algorithms(out),
        Commands::Run(args) => run_single(args, out, input),
        Commands::Compare(args) => run_compare(args, out, input),
    }
}

pub fn print_algorithms(mut out: SharedWriter) -> Result<()> {
    for algorithm in Algorithm::ALL {
        writeln!(out, "{:<16} {}", algorithm.id(), algorithm.name())?;
    }
    Ok(())
}

fn run_single(args: RunArgs, out: SharedWriter, input: impl BufRead) -> Result<()> {
    let algorithm: Algorithm = args.algorithm.parse()?;
    let playback = args.playback;
    let mut generator = playback.generator(ArrayConfig::default())?;
    let player = Player::new(algorithm, generator.generate())
        .with_config(playback.config())
        .with_presenter(Presenter::new(playback.format, out.clone(), None))
        .with_audio(ToneLog::default());

    let player = drive(player, &playback, &mut generator, input)?;
    write_summary(out, playback.format, &[(None, &player)])
}

fn run_compare(args: CompareArgs, out: SharedWriter, input: impl BufRead) -> Result<()> {
    let left: Algorithm = args.left.parse()?;
    let right: Algorithm = args.right.parse()?;
    let playback = args.playback;
    let mut generator = playback.generator(ArrayConfig::comparison())?;
    let array = generator.generate();
    let config = playback.config();
    let side = |algorithm: Algorithm, side: Side, array: Vec<Element>| {
        Player::new(algorithm, array)
            .with_config(config)
            .with_presenter(Presenter::new(
                playback.format,
                out.clone(),
                Some(side.as_str()),
            ))
            .with_audio(ToneLog::default())
    };
    let dual = DualPlayer::new(
        side(left, Side::Left, array.clone()),
        side(right, Side::Right, array),
    );

    let dual = drive(dual, &playback, &mut generator, input)?;
    write_summary(
        out,
        playback.format,
        &[
            (Some(Side::Left), dual.side(Side::Left)),
            (Some(Side::Right), dual.side(Side::Right)),
        ],
    )
}

/// Run `playable` on the playback thread until it settles or the user quits.
fn drive<T: Playable>(
    playable: T,
    playback: &PlaybackArgs,
    generator: &mut ArrayGenerator,
    input: impl BufRead,
) -> Result<T> {
    let handle = spawn(playable)?;
    handle.start();
    if playback.interactive {
        let end = interactive::session(
            input,
            &handle.sender(),
            Duration::from_millis(playback.speed),
            generator,
        )?;
        if end == SessionEnd::Quit {
            return Ok(handle.shutdown());
        }
    }
    handle.wait_idle();
    Ok(handle.shutdown())
}

#[derive(Debug, Serialize)]
struct SummaryLine<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<&'a str>,
    algorithm: &'a str,
    state: PlaybackState,
    len: usize,
    stats: &'a RunStats,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    summary: &'a [SummaryLine<'a>],
}

fn write_summary(
    mut out: SharedWriter,
    format: OutputFormat,
    players: &[(Option<Side>, &Player)],
) -> Result<()> {
    let lines: Vec<SummaryLine<'_>> = players
        .iter()
        .map(|(side, player)| SummaryLine {
            side: side.map(Side::as_str),
            algorithm: player.algorithm().id(),
            state: player.state(),
            len: player.input().len(),
            stats: player.stats(),
        })
        .collect();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut out, &Summary { summary: &lines })?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out)?;
            for line in &lines {
                if let Some(side) = line.side {
                    write!(out, "{side:<5} ")?;
                }
                writeln!(
                    out,
                    "{:<16} {:<9} n={:<5} comparisons={:<6} exchanges={:<6} elapsed={:.2}s ops/s={}",
                    line.algorithm,
                    line.state.as_str(),
                    line.len,
                    line.stats.comparisons,
                    line.stats.exchanges,
                    line.stats.elapsed.as_secs_f64(),
                    line.stats.ops_per_sec,
                )?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
