//! Headless lab runner
//!
//! Drives one experiment at a fixed frame period and logs what a renderer
//! would show.

mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lab_simulation::{DrawAdapter, ExperimentKind, Simulation, SimulationConfig};
use report::LogAdapter;

#[derive(Parser, Debug)]
#[command(about = "Run a physics lab experiment without a window")]
struct Args {
    /// millikan, photoelectric, compton, franck-hertz, malus, double-slit, michelson-morley
    #[arg(short, long, default_value = "photoelectric")]
    experiment: ExperimentKind,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Frame period (ms)
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    #[arg(long)]
    seed: Option<u64>,

    /// Parameter override, e.g. `--set wavelength=250`. Repeatable
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Press the fire button every N frames
    #[arg(long)]
    fire_every: Option<u64>,

    #[arg(long)]
    max_particles: Option<usize>,

    /// Simulated seconds per wall-clock second, at most 100
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Log a summary every N frames
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// List the parameters of the chosen experiment and exit
    #[arg(long)]
    list: bool,
}

fn parse_override(raw: &str) -> Result<(&str, f64)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected KEY=VALUE, got '{raw}'");
    };
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid value for '{}'", key.trim()))?;
    Ok((key.trim(), value))
}

fn config(args: &Args) -> SimulationConfig {
    let mut config = SimulationConfig::default().with_time_scale(args.time_scale);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(max) = args.max_particles {
        config = config.with_max_particles(max);
    }
    config
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if !(args.frame_ms > 0.0) {
        bail!("--frame-ms must be positive");
    }

    let mut sim = Simulation::for_kind(args.experiment, config(&args));

    if args.list {
        for spec in sim.parameters().specs() {
            println!(
                "{:<14} {:<22} {:>8} .. {:<8} default {} {}",
                spec.key, spec.label, spec.min, spec.max, spec.default, spec.unit
            );
        }
        return Ok(());
    }

    for raw in &args.overrides {
        let (key, value) = parse_override(raw)?;
        let stored = sim.set_parameter(key, value)?;
        if stored != value {
            log::warn!("{key} = {value} out of range, clamped to {stored}");
        }
    }

    log::info!("Running '{}' for {} frames", args.experiment, args.ticks);

    let mut adapter = LogAdapter::new(args.report_every);
    for frame in 0..args.ticks {
        if args.fire_every.is_some_and(|n| n > 0 && frame % n == 0) {
            sim.fire_once();
        }
        let snapshot = sim.tick(frame as f64 * args.frame_ms);
        adapter.draw(snapshot);
    }

    adapter.summary(sim.experiment().measurement().kind, sim.measurement());
    Ok(())
}
