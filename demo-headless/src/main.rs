//! Headless falling sand runner
//!
//! Runs the engine without a terminal for a fixed number of ticks and prints
//! a per-kind census and tick counters along the way. Runs are reproducible:
//! the layout and every rule draw come from `--seed`.
//!
//! ```bash
//! cargo run --release --package demo-headless -- --scenario bonfire --ticks 2000
//! ```

mod scenario;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use falling_sand_core::{
    CellKind, Grid, RuleSet, SimContext, Simulation, TickScheduler, TickStats,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scenario::{Scenario, MIN_HEIGHT, MIN_WIDTH};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Falling sand simulation without a terminal
#[derive(Parser, Debug)]
#[command(name = "falling-sand-headless")]
#[command(about = "Run the falling sand engine headless and report cell counts", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 120)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 40)]
    height: usize,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Seed for the layout and the rule draws
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Starting layout
    #[arg(long, value_enum, default_value_t = Scenario::Random)]
    scenario: Scenario,

    /// Print a report every N ticks (0 = only at the end)
    #[arg(short, long, default_value_t = 100)]
    report_every: u64,
}

/// Tick counters summed over a run.
#[derive(Debug, Default)]
struct Totals {
    moved: usize,
    ignited: usize,
    burned_out: usize,
    detonated: usize,
}

impl Totals {
    fn add(&mut self, stats: TickStats) {
        self.moved += stats.moved;
        self.ignited += stats.ignited;
        self.burned_out += stats.burned_out;
        self.detonated += stats.detonated;
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    ensure!(
        args.width >= MIN_WIDTH && args.height >= MIN_HEIGHT,
        "grid must be at least {MIN_WIDTH}x{MIN_HEIGHT} (got {}x{})",
        args.width,
        args.height
    );

    let mut grid = Grid::new(args.width, args.height).context("allocating grid")?;
    args.scenario
        .build(&mut grid, &mut StdRng::seed_from_u64(args.seed));
    info!(scenario = ?args.scenario, seed = args.seed, "Scenario built");

    println!("=== Falling Sand Headless ===\n");
    println!(
        "Grid {}x{}, scenario {:?}, seed {}, {} ticks\n",
        args.width, args.height, args.scenario, args.seed, args.ticks
    );
    print_census(0, &grid, None);

    let ctx = Arc::new(SimContext::new(grid));
    let mut sim = Simulation::with_seed(
        Arc::clone(&ctx),
        RuleSet::default(),
        TickScheduler::new(0),
        args.seed,
    );

    let mut totals = Totals::default();
    let started = Instant::now();
    for _ in 0..args.ticks {
        let stats = sim.tick();
        totals.add(stats);
        if args.report_every > 0 && sim.ticks() % args.report_every == 0 {
            print_census(sim.ticks(), &ctx.lock_grid(), Some(stats));
        }
    }
    let elapsed = started.elapsed();

    if args.report_every == 0 || sim.ticks() % args.report_every != 0 {
        print_census(sim.ticks(), &ctx.lock_grid(), None);
    }

    println!("\n=== Totals ===");
    println!("Moves:       {}", totals.moved);
    println!("Ignitions:   {}", totals.ignited);
    println!("Burned out:  {}", totals.burned_out);
    println!("Detonations: {}", totals.detonated);

    let per_tick = if sim.ticks() > 0 {
        elapsed.as_secs_f64() * 1000.0 / sim.ticks() as f64
    } else {
        0.0
    };
    info!(
        ticks = sim.ticks(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Run finished ({:.3} ms/tick)",
        per_tick
    );
    Ok(())
}

fn print_census(tick: u64, grid: &Grid, stats: Option<TickStats>) {
    let census = grid.census();
    let counts: Vec<String> = CellKind::ALL
        .into_iter()
        .filter(|&kind| kind != CellKind::Empty)
        .map(|kind| format!("{} {:>5}", kind.name(), census.count(kind)))
        .collect();
    print!("[tick {:>6}] {}", tick, counts.join("  "));
    if let Some(stats) = stats {
        print!(
            "  | moved {:>5} ignited {:>3} out {:>3} boom {}",
            stats.moved, stats.ignited, stats.burned_out, stats.detonated
        );
    }
    println!();
}
