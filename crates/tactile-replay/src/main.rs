//! Replays a recorded pointer trace through the animated cursor and prints
//! the resulting frames as JSON lines.
//!
//! ```bash
//! cargo run -p tactile-replay -- trace.json
//! cargo run -p tactile-replay -- trace.json --frame-ms 8 --all-frames
//! cargo run -p tactile-replay -- trace.json --config tactile.toml
//! ```

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tactile_config::TactileConfig;
use tracing::{Level, warn};

mod replay;

use replay::{ReplayOptions, Trace, replay};

#[derive(Parser)]
#[command(name = "tactile-replay")]
#[command(about = "Replay a pointer trace through the animated cursor")]
#[command(version)]
struct Opts {
    /// Trace file (JSON: `styles` map and timestamped `events`).
    trace: PathBuf,

    /// Configuration file (default: tactile.toml in the current directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display refresh interval in milliseconds.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// Print unchanged frames too.
    #[arg(long)]
    all_frames: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<TactileConfig> {
    match path {
        Some(path) => {
            let mut config = TactileConfig::load_from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            config.merge_with_env();
            Ok(config)
        }
        None => Ok(TactileConfig::load()),
    }
}

fn init_logging(level: &str) {
    let parsed = level.parse::<Level>();
    // stdout carries the frames.
    tracing_subscriber::fmt()
        .with_max_level(*parsed.as_ref().unwrap_or(&Level::INFO))
        .with_writer(std::io::stderr)
        .init();
    if parsed.is_err() {
        warn!(level, "unknown log level, falling back to info");
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let config = load_config(opts.config.as_ref())?;
    init_logging(&config.logging.level);

    if !(opts.frame_ms.is_finite() && opts.frame_ms > 0.0) {
        bail!("--frame-ms must be a positive number, got {}", opts.frame_ms);
    }

    let source = std::fs::read_to_string(&opts.trace)
        .with_context(|| format!("failed to read {}", opts.trace.display()))?;
    let trace: Trace = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse trace {}", opts.trace.display()))?;
    trace
        .validate(opts.frame_ms)
        .with_context(|| format!("invalid trace {}", opts.trace.display()))?;

    let frames = replay(
        trace,
        &config,
        ReplayOptions {
            frame_ms: opts.frame_ms,
            all_frames: opts.all_frames,
        },
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for frame in &frames {
        serde_json::to_writer(&mut out, frame).context("failed to encode frame")?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
