//! Interactive Falling Sand Demo
//!
//! Fills the terminal with a grid of cells and runs the simulation live,
//! with the mouse and keyboard as a paint brush.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-interactive -- [TPS]
//! ```
//!
//! `TPS` is the target ticks per second (default 30). `1` runs one tick per
//! second, `0` or below runs as fast as the terminal redraws.
//!
//! # Controls
//!
//! - Arrow keys move the cursor, space paints the cell under it
//! - Left mouse button paints the brush footprint, middle button erases it
//! - `+`/`-` or the mouse wheel resize the brush
//! - `0`-`7` select a cell kind, `Tab` opens the cell picker
//! - `c` clears the grid, `q` quits
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=debug`) to write a log to
//! `falling-sand.log` in the working directory.

mod input;
mod palette;
mod tui;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use falling_sand_core::{
    Grid, RuleSet, SimContext, Simulation, TickScheduler, DEFAULT_TPS,
};
use std::fs::File;
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tui::Tui;
use view::{grid_area, Scene};

/// Log file written when `RUST_LOG` is set
const LOG_FILE: &str = "falling-sand.log";

/// Falling sand cellular automaton in the terminal
#[derive(Parser, Debug)]
#[command(name = "falling-sand")]
#[command(about = "Falling sand simulation in the terminal", long_about = None)]
struct Args {
    /// Target ticks per second (1 = one tick per second, <= 0 = unthrottled)
    #[arg(default_value_t = DEFAULT_TPS, allow_negative_numbers = true)]
    tps: i32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let (columns, rows) = crossterm::terminal::size().context("reading terminal size")?;
    let area = grid_area(ratatui::layout::Rect::new(0, 0, columns, rows));
    let mut grid = Grid::new(usize::from(area.width), usize::from(area.height))
        .context("terminal too small for a grid")?;
    grid.seed_random(&mut rand::rng());
    info!(
        width = grid.width(),
        height = grid.height(),
        tps = args.tps,
        "Grid created"
    );

    let ctx = Arc::new(SimContext::new(grid));
    let rules = RuleSet::default();
    let flicker_chance = rules.flicker_chance;

    let mut tui = Tui::new()?;
    tui.init()?;

    let input_ctx = Arc::clone(&ctx);
    let input = thread::spawn(move || {
        if let Err(err) = input::run(&input_ctx) {
            error!("Input thread failed: {err:#}");
            input_ctx.request_shutdown();
        }
    });

    let mut sim = Simulation::new(ctx, rules, TickScheduler::new(args.tps));
    let result = sim.run(|grid, cursor, rng| {
        tui.terminal
            .draw(|frame| {
                frame.render_widget(
                    Scene::new(grid, cursor, rng, flicker_chance),
                    frame.area(),
                );
            })
            .map(|_| ())
    });

    if input.join().is_err() {
        error!("Input thread panicked");
    }
    tui.exit()?;

    let ticks = result.context("drawing the grid")?;
    info!(ticks, "Exited cleanly");
    Ok(())
}

/// Install a file logger when `RUST_LOG` is set. The terminal belongs to the
/// renderer, so nothing is ever logged to stdout or stderr.
fn init_tracing() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
