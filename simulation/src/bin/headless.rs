//! Runs the simulation without a renderer and reports how the two collision
//! modes perform.

use anyhow::{bail, Result};
use clap::Parser;
use common::shapes::Region;
use simulation::frame_timer::FrameTimer;
use simulation::{Simulation, SimulationConfig, SimulationResult, TickReport};
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless quadtree collision simulation")]
struct Args {
    /// Entities spawned at start
    #[arg(long, default_value_t = 500)]
    entities: usize,
    /// Ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: usize,
    /// Simulated time per tick, in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// Entities a quadtree leaf holds before splitting
    #[arg(long, default_value_t = 4)]
    criteria: usize,
    #[arg(long, default_value_t = 8)]
    max_depth: usize,
    /// Test every pair instead of querying the quadtree
    #[arg(long)]
    brute_force: bool,
    /// Run both modes side by side and fail if their pairs ever differ
    #[arg(long)]
    compare: bool,
    /// Hit points taken on contact; 0 keeps every entity alive
    #[arg(long, default_value_t = 0)]
    damage: u32,
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

impl Args {
    fn config(&self, use_index: bool) -> SimulationConfig {
        let mut config = SimulationConfig {
            criteria: self.criteria,
            max_depth: self.max_depth,
            use_index,
            render_index_boundaries: false,
            render_entities: false,
            ..SimulationConfig::default()
        };
        config.spawn.damage = self.damage;
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let world = Region::new(0.0, 0.0, 1.0, 1.0)?;
    let step = Duration::from_millis(args.tick_ms);

    if args.compare {
        return compare(&args, world, step);
    }

    let mut sim = Simulation::with_seed(world, args.config(!args.brute_force), args.seed)?;
    sim.initialize(args.entities)?;
    let mut timer = FrameTimer::new();
    let mut pairs = 0;
    for _ in 0..args.ticks {
        let started = Instant::now();
        let report = sim.tick(step)?;
        timer.record(started.elapsed());
        pairs += report.pairs.len();
    }
    summarize(
        if args.brute_force { "brute force" } else { "quadtree" },
        &timer,
        pairs,
        sim.registry().len(),
    );
    Ok(())
}

fn compare(args: &Args, world: Region, step: Duration) -> Result<()> {
    let mut indexed = Simulation::with_seed(world, args.config(true), args.seed)?;
    let mut brute = Simulation::with_seed(world, args.config(false), args.seed)?;
    indexed.initialize(args.entities)?;
    brute.initialize(args.entities)?;

    let mut indexed_timer = FrameTimer::new();
    let mut brute_timer = FrameTimer::new();
    let (mut indexed_tests, mut brute_tests, mut pairs) = (0, 0, 0);

    for tick in 0..args.ticks {
        let (a, elapsed) = timed(|| indexed.tick(step))?;
        indexed_timer.record(elapsed);
        let (b, elapsed) = timed(|| brute.tick(step))?;
        brute_timer.record(elapsed);

        if a.pairs != b.pairs || a.removed != b.removed {
            error!(
                tick,
                indexed = a.pairs.len(),
                brute_force = b.pairs.len(),
                "collision modes disagree"
            );
            bail!("collision modes disagree at tick {tick}");
        }
        indexed_tests += a.narrow_tests;
        brute_tests += b.narrow_tests;
        pairs += a.pairs.len();
    }

    summarize("quadtree", &indexed_timer, pairs, indexed.registry().len());
    summarize("brute force", &brute_timer, pairs, brute.registry().len());
    info!(
        indexed_tests,
        brute_tests,
        ticks = args.ticks,
        "both modes reported identical pairs"
    );
    Ok(())
}

fn timed(
    tick: impl FnOnce() -> SimulationResult<TickReport>,
) -> Result<(TickReport, Duration)> {
    let started = Instant::now();
    let report = tick()?;
    Ok((report, started.elapsed()))
}

fn summarize(mode: &str, timer: &FrameTimer, pairs: usize, entities: usize) {
    match (timer.average(), timer.fps()) {
        (Some(average), Some(fps)) => info!(
            mode,
            average_tick_us = average.as_micros() as u64,
            fps,
            pairs,
            entities,
            "run finished"
        ),
        _ => info!(mode, pairs, entities, "run finished, too few ticks to time"),
    }
}
