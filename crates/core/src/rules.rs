//! Tuning constants for the transition rules
//!
//! The probabilities and extents below were chosen by eye rather than derived
//! from anything physical. The defaults are the reference behavior: fire acts
//! on 15% of the ticks it has fuel, leaves ash 4% of the time, keeps burning
//! 2% of the time, and a bomb blast covers a 15×7 rectangle.

use serde::{Deserialize, Serialize};

/// Half-width and half-height of a rectangle centred on a cell.
///
/// A `HalfExtent { x: 1, y: 1 }` covers the 3×3 block around the centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfExtent {
    pub x: usize,
    pub y: usize,
}

impl HalfExtent {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether offset `(dx, dy)` from the centre lies inside the rectangle.
    #[inline]
    pub fn contains(&self, dx: isize, dy: isize) -> bool {
        dx.unsigned_abs() <= self.x && dy.unsigned_abs() <= self.y
    }

    /// Full width in cells.
    pub fn width(&self) -> usize {
        2 * self.x + 1
    }

    /// Full height in cells.
    pub fn height(&self) -> usize {
        2 * self.y + 1
    }
}

/// Every tunable of the update engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Fire with a Wood neighbor only acts when its draw `r` is at most this
    pub fire_act_threshold: f32,
    /// Below this draw the burning cell stays Fire (or turns to Ash)
    pub fire_persist_bound: f32,
    /// Below this draw the burning cell turns to Ash
    pub fire_ash_bound: f32,

    /// Ticks without a Fire neighbor before a bomb detonates on its own
    pub bomb_fuse_ticks: u16,
    /// Rectangle touched by a detonation
    pub blast: HalfExtent,
    /// Inner rectangle forced to Fire
    pub blast_fire_zone: HalfExtent,
    /// Core rectangle forced to Empty
    pub blast_core_zone: HalfExtent,
    /// Each blast cell is left untouched with probability `1 / blast_skip_one_in`
    pub blast_skip_one_in: u32,
    /// Extra reach added to the displacement range of flung debris (0 allowed)
    pub debris_slack: usize,

    /// Chance that a Fire cell paints a flicker spark on each neighbor,
    /// clamped to `[0, 1]` when used
    pub flicker_chance: f64,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            fire_act_threshold: 0.15,
            fire_persist_bound: 0.06,
            fire_ash_bound: 0.04,
            bomb_fuse_ticks: 50,
            blast: HalfExtent::new(7, 3),
            blast_fire_zone: HalfExtent::new(4, 2),
            blast_core_zone: HalfExtent::new(1, 1),
            blast_skip_one_in: 6,
            debris_slack: 4,
            flicker_chance: 0.3,
        }
    }
}
