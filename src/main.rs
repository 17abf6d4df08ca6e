//! Stick Arcade entry point
//!
//! Runs one of the three variants through the frame driver. With no
//! keyboard attached, a seeded demo player presses the bound keys; the
//! renderer logs a periodic summary instead of drawing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use stick_arcade::platform::{Clock, DemoInput, FixedRateClock, ManualClock};
use stick_arcade::renderer::LogRenderer;
use stick_arcade::sim::{GameState, Variant};
use stick_arcade::{Bindings, FrameDriver, RunSettings, RunSummary, Tuning};

/// Tick limit for headless runs that did not ask for one (one minute of play)
const HEADLESS_TICKS: u64 = 3600;

/// Fixed-tick arcade simulations: team battle, ball breaker, fighter
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Variant to run (battle, breaker, fighter)
    #[arg(short, long, value_parser = parse_variant)]
    variant: Option<Variant>,

    /// RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Run settings JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tuning overrides JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Key bindings JSON file
    #[arg(long)]
    bindings: Option<PathBuf>,

    /// Run as fast as possible instead of pacing to the tick rate
    #[arg(long)]
    headless: bool,

    /// Frames between summary log lines
    #[arg(long, default_value_t = 60)]
    log_every: u64,
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_name(s).ok_or_else(|| format!("unknown variant '{s}'"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => RunSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => RunSettings::default(),
    };
    if let Some(variant) = args.variant {
        settings.variant = variant;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if args.ticks.is_some() {
        settings.max_ticks = args.ticks;
    }
    if args.headless {
        settings.realtime = false;
    }
    if !settings.realtime && settings.max_ticks.is_none() {
        log::info!("Headless run without a tick limit, stopping after {HEADLESS_TICKS} ticks");
        settings.max_ticks = Some(HEADLESS_TICKS);
    }
    settings.validate().context("invalid run settings")?;

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let bindings = match &args.bindings {
        Some(path) => Bindings::load(path)
            .with_context(|| format!("loading bindings from {}", path.display()))?,
        None => Bindings::default(),
    };

    log::info!(
        "Stick Arcade starting: {} (seed {}, {} Hz, {:.4}s per tick)",
        settings.variant.as_str(),
        settings.seed,
        settings.tick_rate,
        settings.tick_seconds()
    );

    let summary = if settings.realtime {
        run(&settings, tuning, bindings, &args, FixedRateClock::new())
    } else {
        run(&settings, tuning, bindings, &args, ManualClock::new())
    };

    println!(
        "{} finished after {} ticks ({:?}): winner {:?}, score {}, money {}, eliminated {}",
        settings.variant.as_str(),
        summary.ticks,
        summary.reason,
        summary.winner,
        summary.score,
        summary.money,
        summary.eliminated
    );
    Ok(())
}

fn run<C: Clock>(
    settings: &RunSettings,
    tuning: Tuning,
    bindings: Bindings,
    args: &Args,
    clock: C,
) -> RunSummary {
    let state = GameState::new(settings.variant, settings.playfield, tuning, settings.seed);
    let input = DemoInput::new(settings.seed, &bindings);
    let renderer = LogRenderer::new(args.log_every);

    FrameDriver::new(state, bindings, input, renderer, clock, settings.tick_rate)
        .with_tick_limit(settings.max_ticks)
        .run()
}
