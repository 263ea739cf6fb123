//! Headless Sorting Simulation
//!
//! Drives the colony frame by frame without a GUI, logging sorting progress
//! and optionally printing the board.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use colony_core::config::DEFAULT_TUNING_PATH;
use colony_core::{
    render_ascii, ConfigError, Policy, SimConfig, SimResult, Simulation, SortingStats,
    StatsCollector,
};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "colony_sim")]
#[command(about = "Ant-colony style object sorting on a grid")]
struct Args {
    /// Tuning file; defaults are used when it does not exist
    #[arg(long, default_value = DEFAULT_TUNING_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Policy override: basic, basic_with_error or cooperative
    #[arg(long)]
    policy: Option<Policy>,

    /// Interval between progress reports (in ticks), 0 to disable
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Print the board at every report
    #[arg(long)]
    ascii: bool,

    /// Print the final board as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match load_config(&args.config, args.policy) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("simulation aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path, policy: Option<Policy>) -> Result<SimConfig, ConfigError> {
    let mut config = match SimConfig::load(path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) => {
            tracing::warn!("Could not read {}: {}. Using defaults.", path.display(), e);
            SimConfig::default()
        }
        Err(e) => return Err(e),
    };

    if let Some(policy) = policy {
        config.behavior.policy = policy;
        if policy != Policy::Cooperative && config.population.objects_c > 0 {
            tracing::info!(
                objects_c = config.population.objects_c,
                "heavy objects removed for the {:?} policy",
                policy
            );
            config.population.objects_c = 0;
        }
        config.validate()?;
    }
    Ok(config)
}

fn run(args: &Args, config: SimConfig) -> SimResult<()> {
    tracing::info!(
        seed = args.seed,
        ticks = args.ticks,
        policy = ?config.behavior.policy,
        "starting {}x{} colony",
        config.grid.width,
        config.grid.height
    );

    let mut frame = config.frame.clone();
    let mut sim = Simulation::new(config, args.seed)?;
    for line in sim.spawn_summary().to_string().lines() {
        tracing::info!("{}", line);
    }
    let mut collector = StatsCollector::new();
    let mut next_report = args.report_every;

    report(&sim, args.ascii);

    if !frame.is_running() {
        tracing::warn!("frame control is paused; nothing to run");
    }

    while frame.is_running() && sim.tick_count() < args.ticks {
        let remaining = args.ticks - sim.tick_count();
        if u64::from(frame.steps_per_frame()) > remaining {
            frame.set_steps_per_frame(remaining as u32);
        }
        sim.advance_frame(&frame)?;
        collector.record(&sim.drain_events());

        if args.report_every > 0 && sim.tick_count() >= next_report {
            report(&sim, args.ascii);
            while next_report <= sim.tick_count() {
                next_report += args.report_every;
            }
        }

        let delay = frame.delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    let stats = SortingStats::collect(&sim);
    tracing::info!(
        total_events = collector.total_events,
        "simulation complete after {} ticks: {}",
        sim.tick_count(),
        stats
    );
    for (event_type, count) in &collector.events_by_type {
        tracing::info!("  {}: {}", event_type, count);
    }

    if args.json {
        match sim.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("could not serialize snapshot: {}", e),
        }
    }
    Ok(())
}

fn report(sim: &Simulation, ascii: bool) {
    tracing::info!("{}", SortingStats::collect(sim));
    if ascii {
        println!("{}", render_ascii(sim));
    }
}
