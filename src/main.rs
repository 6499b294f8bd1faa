// src/main.rs
extern crate anyhow;
extern crate battery_bridge;

use anyhow::{Context, Result};
use battery_bridge::core::config::Config;
use battery_bridge::core::logging;
use battery_bridge::core::probe::{Probe, StatusFormat};
use battery_bridge::core::sensors::SensorFileCache;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "battery-bridge")]
#[command(about = "Print battery telemetry read from sysfs")]
struct Cli {
    /// Read this config file instead of the system/user layers
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of snapshots to take
    #[arg(long)]
    samples: Option<u32>,

    /// Milliseconds between snapshots
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Also append each snapshot line to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// How to print the charging status
    #[arg(long, value_enum)]
    status_format: Option<StatusFormat>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Logging first, so config loading is visible
    let log_level = logging::init()?;

    // 2. Load config, then let flags override it
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(samples) = cli.samples {
        config.probe.samples = samples;
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.probe.interval_ms = interval_ms;
    }
    if let Some(format) = cli.status_format {
        config.probe.status_format = format;
    }
    if cli.output.is_some() {
        config.probe.output = cli.output;
    }
    // flags can bring back values the file loaders already rejected
    config.validate()?;
    log_level.apply(&config.log_level)?;

    // 3. Open the sensor files and sample them
    let cache = SensorFileCache::global();
    cache
        .init()
        .with_context(|| format!("Initialising battery sensors under {:?}", cache.root()))?;

    let stdout = std::io::stdout();
    Probe::new(cache, config.probe).run(&mut stdout.lock())?;
    Ok(())
}
