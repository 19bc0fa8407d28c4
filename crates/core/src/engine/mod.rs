//! Per-tick update engine
//!
//! One tick visits every cell at most once. Rows are processed bottom to top
//! so a cell that falls lands in a row that has already been handled this
//! tick. Columns within a row follow a [`RowOrder`] shuffled once per tick and
//! rotated before every row.
//!
//! Cells that land in a part of the scan not visited yet (a burning Wood cell
//! in the row above, water moving sideways into an unvisited column) are
//! flagged `skip_update` so they do not act twice. A flagged cell clears the
//! flag when its turn comes and does nothing else.

pub mod blast;
pub mod transition;

pub use blast::{detonate, BlastReport};
pub use transition::{decide, Passable, Transition, NEIGHBORHOOD};

use crate::cell::{Cell, CellKind};
use crate::grid::Grid;
use crate::order::RowOrder;
use crate::rules::RuleSet;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Counters for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickStats {
    /// Cells that traded places with a neighbor
    pub moved: usize,
    /// Wood cells set alight
    pub ignited: usize,
    /// Fire cells that went out (quenched or nothing left to burn)
    pub burned_out: usize,
    /// Bombs that went off
    pub detonated: usize,
    /// Cells passed over because of a pending `skip_update`
    pub skipped: usize,
}

/// Applies the transition rules to a grid, one tick at a time.
///
/// Keeps the column order and visited buffers between ticks so a pass does
/// not allocate.
#[derive(Debug, Clone)]
pub struct UpdateEngine {
    rules: RuleSet,
    order: RowOrder,
    /// Columns of the current row already visited
    visited: Vec<bool>,
    last_stats: TickStats,
}

impl UpdateEngine {
    /// Create an engine for grids `width` cells wide.
    pub fn new(width: usize, rules: RuleSet) -> Self {
        Self {
            rules,
            order: RowOrder::new(width),
            visited: vec![false; width],
            last_stats: TickStats::default(),
        }
    }

    /// Counters from the most recent tick
    pub fn last_stats(&self) -> TickStats {
        self.last_stats
    }

    /// Run one full pass over `grid`.
    ///
    /// The caller must hold exclusive access to the grid for the whole call;
    /// the pass is never split.
    pub fn apply_tick<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> TickStats {
        if self.order.len() != grid.width() {
            self.order = RowOrder::new(grid.width());
            self.visited = vec![false; grid.width()];
        }

        let mut stats = TickStats::default();
        self.order.shuffle(rng);

        for y in (0..grid.height()).rev() {
            self.order.rotate(rng);
            self.visited.fill(false);

            for i in 0..self.order.len() {
                let x = self.order.as_slice()[i];
                self.visited[x] = true;

                let index = grid.index(x, y);
                if grid.cell_mut(index).is_some_and(Cell::take_skip_update) {
                    stats.skipped += 1;
                    continue;
                }

                let transition = decide(grid, x, y, &self.rules, rng);
                self.apply(grid, index, y, transition, rng, &mut stats);
            }
        }

        trace!(
            moved = stats.moved,
            ignited = stats.ignited,
            burned_out = stats.burned_out,
            detonated = stats.detonated,
            skipped = stats.skipped,
            "Tick complete"
        );
        self.last_stats = stats;
        stats
    }

    /// Whether `target` has yet to be visited in this pass. `y` is the row
    /// being processed.
    fn is_ahead(&self, grid: &Grid, target: usize, y: usize) -> bool {
        let (tx, ty) = grid.coords(target);
        ty < y || (ty == y && !self.visited[tx])
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        index: usize,
        y: usize,
        transition: Transition,
        rng: &mut R,
        stats: &mut TickStats,
    ) {
        match transition {
            Transition::Stay => {}
            Transition::Swap(target) => {
                grid.swap(index, target);
                // The displaced cell now sits in a visited slot
                if let Some(displaced) = grid.cell_mut(index) {
                    displaced.skip_update = false;
                }
                if self.is_ahead(grid, target, y) {
                    if let Some(moved) = grid.cell_mut(target) {
                        moved.skip_update = true;
                    }
                }
                stats.moved += 1;
            }
            Transition::Become(kind) => {
                if let Some(cell) = grid.cell_mut(index) {
                    if cell.kind == CellKind::Fire && kind != CellKind::Fire {
                        stats.burned_out += 1;
                    }
                    cell.kind = kind;
                }
            }
            Transition::Ignite { target, leaves } => {
                let ahead = self.is_ahead(grid, target, y);
                if let Some(fuel) = grid.cell_mut(target) {
                    fuel.kind = CellKind::Fire;
                    if ahead {
                        fuel.skip_update = true;
                    }
                }
                if let Some(cell) = grid.cell_mut(index) {
                    cell.kind = leaves;
                }
                stats.ignited += 1;
                if leaves != CellKind::Fire {
                    stats.burned_out += 1;
                }
            }
            Transition::Fuse => {
                if let Some(cell) = grid.cell_mut(index) {
                    cell.timer = cell.timer.saturating_add(1);
                }
            }
            Transition::Detonate => {
                let (x, y) = grid.coords(index);
                detonate(grid, x, y, &self.rules, rng);
                stats.detonated += 1;
            }
        }
    }
}

/// Run one tick over `grid` with the default rules and the thread-local
/// generator.
pub fn apply_tick(grid: &mut Grid) {
    let mut engine = UpdateEngine::new(grid.width(), RuleSet::default());
    engine.apply_tick(grid, &mut rand::rng());
}
