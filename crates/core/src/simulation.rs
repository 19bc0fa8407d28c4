//! Simulation loop
//!
//! Owns the engine, scheduler and random generator and drives them against a
//! shared [`SimContext`]. Each step runs one engine pass with the grid lock
//! held for the whole pass, releases it, then hands grid and cursor to a
//! render callback under [`SimContext::lock_view`].

use crate::cursor::Cursor;
use crate::engine::{TickStats, UpdateEngine};
use crate::grid::Grid;
use crate::rules::RuleSet;
use crate::scheduler::TickScheduler;
use crate::sync::SimContext;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, info};

/// The tick-render-sleep loop of the simulation thread.
pub struct Simulation {
    ctx: Arc<SimContext>,
    engine: UpdateEngine,
    scheduler: TickScheduler,
    rng: StdRng,
    ticks: u64,
}

impl Simulation {
    /// Simulation seeded from the operating system.
    pub fn new(ctx: Arc<SimContext>, rules: RuleSet, scheduler: TickScheduler) -> Self {
        Self::with_rng(ctx, rules, scheduler, StdRng::from_os_rng())
    }

    /// Simulation with a reproducible generator.
    pub fn with_seed(
        ctx: Arc<SimContext>,
        rules: RuleSet,
        scheduler: TickScheduler,
        seed: u64,
    ) -> Self {
        Self::with_rng(ctx, rules, scheduler, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        ctx: Arc<SimContext>,
        rules: RuleSet,
        scheduler: TickScheduler,
        rng: StdRng,
    ) -> Self {
        let width = ctx.lock_grid().width();
        Self {
            ctx,
            engine: UpdateEngine::new(width, rules),
            scheduler,
            rng,
            ticks: 0,
        }
    }

    pub fn context(&self) -> &Arc<SimContext> {
        &self.ctx
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one engine pass under the grid lock.
    pub fn tick(&mut self) -> TickStats {
        let stats = {
            let mut grid = self.ctx.lock_grid();
            self.engine.apply_tick(&mut grid, &mut self.rng)
        };
        self.ticks += 1;
        stats
    }

    /// Tick, then render under the combined grid and cursor lock.
    pub fn step<E>(
        &mut self,
        render: &mut impl FnMut(&mut Grid, &Cursor, &mut StdRng) -> Result<(), E>,
    ) -> Result<TickStats, E> {
        let stats = self.tick();
        let mut view = self.ctx.lock_view();
        render(&mut *view.grid, &*view.cursor, &mut self.rng)?;
        Ok(stats)
    }

    /// Step at the scheduler's pace until shutdown is requested.
    ///
    /// A render error requests shutdown so the input thread stops too, and is
    /// returned. Returns the number of ticks run.
    pub fn run<E>(
        &mut self,
        mut render: impl FnMut(&mut Grid, &Cursor, &mut StdRng) -> Result<(), E>,
    ) -> Result<u64, E> {
        info!(
            target_tps = self.scheduler.target_tps(),
            "Simulation loop started"
        );
        let start_ticks = self.ticks;
        let scheduler = self.scheduler;

        while self.ctx.is_running() {
            if let Err(err) = scheduler.run_tick(|| self.step(&mut render)) {
                self.ctx.request_shutdown();
                return Err(err);
            }
            if self.ticks % 1000 == 0 {
                debug!(ticks = self.ticks, stats = ?self.engine.last_stats(), "Progress");
            }
        }

        let ran = self.ticks - start_ticks;
        info!(ticks = ran, "Simulation loop stopped");
        Ok(ran)
    }
}
