// posebeat: headless driver for the pose rhythm game.
//
// Feeds landmark frames (autoplay performer or a recorded session) through the
// fixed-rate game loop and prints the session summary as JSON.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use posebeat::logging;
use posebeat::{
    App, AutoplaySource, Clock, FixedTicker, InferenceWorker, LandmarkSource, MonotonicClock,
    PoseRecorder, RecordingSource, StateTransition, load_config,
};
use posebeat_config::GameConfig;
use posebeat_rule::{SessionSummary, TickReport};
use tracing::{debug, info, warn};

/// Ticks of catch-up allowed after a stall before ticks are dropped.
const MAX_CATCH_UP: u32 = 5;

/// One minute at the default tick rate.
const DEFAULT_TICKS: u64 = 1800;

#[derive(Parser, Debug)]
#[command(name = "posebeat", about = "Pose-gesture rhythm game")]
struct Args {
    /// Path to the game config JSON file.
    #[arg(long, env = "POSEBEAT_CONFIG", default_value = "posebeat.json")]
    config: PathBuf,

    /// Replay landmark input from a recording instead of the autoplay performer.
    #[arg(long)]
    recording: Option<PathBuf>,

    /// Save the landmark input of this run to a recording.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Session length in ticks (defaults to the recording length, or one minute).
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed for the target sequence. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Pace ticks in real time instead of running as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Also write logs to daily files in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Enable debug logging (one line per judgement).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init_logging(args.log_dir.as_deref(), args.verbose)?;
    info!("posebeat starting");

    let config = load_config(&args.config)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "target sequence seed");

    let summary = run(&args, config, seed)?;
    let json = serde_json::to_string_pretty(&summary).context("encoding summary")?;
    println!("{json}");
    Ok(())
}

fn open_source(args: &Args, config: &GameConfig) -> Result<(Box<dyn LandmarkSource>, Option<u64>)> {
    let Some(path) = &args.recording else {
        return Ok((Box::new(AutoplaySource::new()), None));
    };

    let source = RecordingSource::open(path)?;
    let frames = source.remaining() as u64;
    info!(path = %path.display(), frames, "Loaded pose recording");
    if source.tick_rate() != config.window.tick_rate {
        warn!(
            recorded = source.tick_rate(),
            configured = config.window.tick_rate,
            "recording tick rate differs from config"
        );
    }

    if args.realtime {
        // Emulate a camera: frames arrive on their own thread at the recorded rate.
        let interval = Duration::from_micros(1_000_000 / u64::from(source.tick_rate()));
        let worker = InferenceWorker::spawn(source, interval)?;
        return Ok((Box::new(worker), Some(frames)));
    }
    Ok((Box::new(source), Some(frames)))
}

fn run(args: &Args, config: GameConfig, seed: u64) -> Result<SessionSummary> {
    let tick_us = config.tick_us();
    let tick_rate = config.window.tick_rate;
    let (mut source, recorded_len) = open_source(args, &config)?;
    let ticks = args.ticks.or(recorded_len).unwrap_or(DEFAULT_TICKS);

    let mut recorder = args.record.as_ref().map(|_| PoseRecorder::new(tick_rate));
    let mut app = App::new(config, Some(seed)).with_session_ticks(ticks);
    app.start_game();

    let clock = MonotonicClock::new();
    let mut ticker = FixedTicker::new(tick_us, clock.now_us(), MAX_CATCH_UP);

    'game: loop {
        let due = if args.realtime {
            let now = clock.now_us();
            let wait = ticker.until_next_us(now);
            if wait > 0 {
                std::thread::sleep(Duration::from_micros(wait as u64));
            }
            ticker.due(clock.now_us())
        } else {
            1
        };

        for _ in 0..due {
            let targets = app.session().map(|s| s.targets()).unwrap_or_default();
            let frame = source.next_frame(targets).unwrap_or_else(|e| {
                warn!(error = %e, "landmark source failed, treating tick as empty");
                None
            });
            if let Some(recorder) = recorder.as_mut() {
                recorder.push(frame.as_ref());
            }

            let (report, transition) = app.update(frame.as_deref());
            if let Some(TickReport {
                tick,
                spawned: Some(spawned),
                ..
            }) = &report
            {
                debug!(tick, %spawned, "target spawned");
            }
            if transition == StateTransition::Finished {
                break 'game;
            }
        }

        if args.recording.is_some() && source.is_finished() {
            info!("recording exhausted");
            break;
        }
    }

    if ticker.dropped() > 0 {
        warn!(dropped = ticker.dropped(), "ticks dropped while running behind");
    }
    if let (Some(path), Some(recorder)) = (&args.record, recorder) {
        let frames = recorder.len();
        recorder.finish().write(path)?;
        info!(path = %path.display(), frames, "Saved pose recording");
    }

    app.end_game().context("no session was running")
}
