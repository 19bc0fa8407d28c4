//! Bomb detonation
//!
//! A blast walks a fixed rectangle around the bomb. Each in-bounds cell is
//! independently spared with probability `1 / blast_skip_one_in`, which gives
//! the crater a ragged edge. Touched cells fall into one of three zones:
//!
//! - core: forced to Empty
//! - fire zone: forced to Fire
//! - outer ring: non-Empty cells are flung outward, leaving Fire behind
//!
//! Debris moves away from the bomb along the sign of its own offset, by a
//! random distance below `|offset| + debris_slack`. Debris that would land
//! off the grid stays where it is.

use crate::cell::CellKind;
use crate::grid::Grid;
use crate::rules::RuleSet;
use rand::Rng;
use tracing::debug;

/// Cells a detonation actually touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlastReport {
    /// Linear indices of every cell inside the blast that was not spared
    pub touched: Vec<usize>,
    /// Number of outer-ring cells that were flung to a new position
    pub flung: usize,
}

#[inline]
fn sign(v: isize) -> isize {
    if v < 0 {
        -1
    } else {
        1
    }
}

/// Detonate the bomb at `(x, y)`.
///
/// Touched cells get their timer reset. Those at or below the bomb's row are
/// marked to skip their next update. The bomb's own cell always ends Empty.
pub fn detonate<R: Rng + ?Sized>(
    grid: &mut Grid,
    x: usize,
    y: usize,
    rules: &RuleSet,
    rng: &mut R,
) -> BlastReport {
    let mut report = BlastReport::default();
    let reach_x = rules.blast.x as isize;
    let reach_y = rules.blast.y as isize;

    for dy in -reach_y..=reach_y {
        for dx in -reach_x..=reach_x {
            let Some(index) = grid.neighbor(x, y, dx, dy) else {
                continue;
            };
            if rules.blast_skip_one_in > 0 && rng.random_range(0..rules.blast_skip_one_in) == 0 {
                continue;
            }

            if rules.blast_core_zone.contains(dx, dy) {
                set_kind(grid, index, CellKind::Empty);
            } else if rules.blast_fire_zone.contains(dx, dy) {
                set_kind(grid, index, CellKind::Fire);
            } else if grid.cell(index).is_some_and(|c| c.kind != CellKind::Empty)
                && fling(grid, x, y, dx, dy, index, rules, rng)
            {
                report.flung += 1;
            }

            if let Some(cell) = grid.cell_mut(index) {
                cell.timer = 0;
                if dy >= 0 {
                    cell.skip_update = true;
                }
            }
            report.touched.push(index);
        }
    }

    if let Some(cell) = grid.get_mut(x, y) {
        cell.kind = CellKind::Empty;
        cell.timer = 0;
    }

    debug!(
        x,
        y,
        touched = report.touched.len(),
        flung = report.flung,
        "Bomb detonated"
    );
    report
}

fn set_kind(grid: &mut Grid, index: usize, kind: CellKind) {
    if let Some(cell) = grid.cell_mut(index) {
        cell.kind = kind;
    }
}

/// Random distance below `|offset| + slack`. A zero-width range lands in place.
fn debris_jump<R: Rng + ?Sized>(offset: isize, slack: usize, rng: &mut R) -> isize {
    let reach = (offset.unsigned_abs() + slack).max(1);
    rng.random_range(0..reach) as isize
}

/// Throw the cell at offset `(dx, dy)` from the bomb outward. Returns whether
/// it landed on the grid.
#[allow(clippy::too_many_arguments)]
fn fling<R: Rng + ?Sized>(
    grid: &mut Grid,
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
    index: usize,
    rules: &RuleSet,
    rng: &mut R,
) -> bool {
    let jump_x = debris_jump(dx, rules.debris_slack, rng);
    let jump_y = debris_jump(dy, rules.debris_slack, rng);
    let Some(landing) = grid.neighbor(x, y, dx + sign(dx) * jump_x, dy + sign(dy) * jump_y)
    else {
        return false;
    };

    let Some(kind) = grid.cell(index).map(|c| c.kind) else {
        return false;
    };
    if let Some(target) = grid.cell_mut(landing) {
        target.kind = kind;
        target.timer = 0;
    }
    set_kind(grid, index, CellKind::Fire);
    true
}
