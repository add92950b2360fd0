//! palmgrid CLI — replay recorded frames through the gesture pipelines.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use palmgrid::{
    param_specs, pointer_param_specs, EventLog, Frame, HandTracker, PointerConfig, PointerEvent,
    PointerSample, PointerTracker, TrackerConfig, TrackerReport,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "palmgrid")]
#[command(about = "Replay depth-sensor frame recordings through the hand and pointer trackers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay frames through the hand tracker.
    Track(CliTrackArgs),

    /// Replay frames through the proximity pointer tracker.
    Point(CliPointArgs),

    /// Print the named-parameter registry.
    Params,
}

#[derive(Debug, Clone, Args)]
struct CliTrackArgs {
    /// Path to a frame recording (JSON array of frames).
    #[arg(long)]
    frames: PathBuf,

    /// Path to write per-frame reports (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Tracker configuration (JSON); defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sample the first frame as the background reference before replay.
    #[arg(long)]
    sample_first: bool,
}

#[derive(Debug, Clone, Args)]
struct CliPointArgs {
    /// Path to a frame recording (JSON array of frames).
    #[arg(long)]
    frames: PathBuf,

    /// Path to write samples and emitted events (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Pointer configuration (JSON); defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track(args) => run_track(&args),
        Commands::Point(args) => run_point(&args),
        Commands::Params => run_params(),
    }
}

fn load_frames(path: &Path) -> CliResult<Vec<Frame>> {
    let frames: Vec<Frame> = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    tracing::info!(count = frames.len(), "loaded frame recording");
    Ok(frames)
}

fn load_config<T: serde::de::DeserializeOwned + Default>(path: Option<&PathBuf>) -> CliResult<T> {
    match path {
        Some(p) => Ok(serde_json::from_reader(BufReader::new(File::open(p)?))?),
        None => Ok(T::default()),
    }
}

fn run_track(args: &CliTrackArgs) -> CliResult<()> {
    let config: TrackerConfig = load_config(args.config.as_ref())?;
    let frames = load_frames(&args.frames)?;
    let mut tracker = HandTracker::new(config);

    if args.sample_first {
        if let Some(first) = frames.first() {
            tracker.sample_background(first);
        }
    }

    let reports: Vec<TrackerReport> = frames.iter().map(|f| tracker.observe(f)).collect();
    let hands: usize = reports.iter().map(|r| r.hands.len()).sum();
    tracing::info!(frames = reports.len(), hands, "replay finished");

    serde_json::to_writer_pretty(BufWriter::new(File::create(&args.out)?), &reports)?;
    Ok(())
}

#[derive(Serialize)]
struct PointReplay {
    samples: Vec<Option<PointerSample>>,
    events: Vec<PointerEvent>,
}

fn run_point(args: &CliPointArgs) -> CliResult<()> {
    let config: PointerConfig = load_config(args.config.as_ref())?;
    let frames = load_frames(&args.frames)?;
    let mut tracker = PointerTracker::new(config);
    let mut log = EventLog::default();

    let samples: Vec<Option<PointerSample>> = frames
        .iter()
        .map(|f| tracker.observe(f, &mut log))
        .collect();
    tracing::info!(
        frames = samples.len(),
        events = log.events.len(),
        "replay finished"
    );

    let replay = PointReplay {
        samples,
        events: log.events,
    };
    serde_json::to_writer_pretty(BufWriter::new(File::create(&args.out)?), &replay)?;
    Ok(())
}

fn run_params() -> CliResult<()> {
    println!("tracker:");
    println!("  {:<16} {:>9} {:>10}", "name", "precision", "max");
    for spec in param_specs() {
        println!("  {:<16} {:>9} {:>10}", spec.name, spec.precision, spec.max);
    }
    println!("pointer:");
    println!("  {:<16} {:>9} {:>10}", "name", "precision", "max");
    for spec in pointer_param_specs() {
        println!("  {:<16} {:>9} {:>10}", spec.name, spec.precision, spec.max);
    }
    Ok(())
}
