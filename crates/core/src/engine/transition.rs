//! Per-cell transition decisions
//!
//! Each rule looks at a cell and its neighborhood and returns a [`Transition`]
//! describing what should happen. Decisions never mutate the grid; the engine
//! applies them, which keeps the skip-flag and statistics bookkeeping in one
//! place.

use crate::cell::CellKind;
use crate::grid::Grid;
use crate::rules::RuleSet;
use rand::Rng;

/// 8-neighborhood in scan priority order: row above, same row, row below.
pub const NEIGHBORHOOD: [(isize, isize); 8] = [
    (0, -1),
    (-1, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (0, 1),
    (-1, 1),
    (1, 1),
];

/// Outcome of one cell's rule for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changes
    Stay,
    /// Exchange places with the cell at this index
    Swap(usize),
    /// Turn into another kind in place
    Become(CellKind),
    /// Set the target on fire, then turn into `leaves`
    Ignite { target: usize, leaves: CellKind },
    /// Advance the bomb fuse by one tick
    Fuse,
    /// Blow up the neighborhood
    Detonate,
}

/// Which kinds a moving cell may trade places with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passable {
    /// Sand and Ash sink through Water as well as falling into Empty
    Granular,
    /// Water only flows into Empty
    Fluid,
}

impl Passable {
    #[inline]
    pub fn admits(self, kind: CellKind) -> bool {
        match self {
            Passable::Granular => matches!(kind, CellKind::Empty | CellKind::Water),
            Passable::Fluid => kind == CellKind::Empty,
        }
    }
}

/// Index of the neighbor at `(dx, dy)` if it exists and admits the mover.
#[inline]
pub fn open_target(
    grid: &Grid,
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
    passable: Passable,
) -> Option<usize> {
    let index = grid.neighbor(x, y, dx, dy)?;
    let kind = grid.cell(index)?.kind;
    passable.admits(kind).then_some(index)
}

/// Pick between a left and right candidate, coin-flipping on a tie.
fn either_side<R: Rng + ?Sized>(
    left: Option<usize>,
    right: Option<usize>,
    rng: &mut R,
) -> Transition {
    match (left, right) {
        (Some(l), Some(r)) => Transition::Swap(if rng.random_bool(0.5) { l } else { r }),
        (Some(l), None) => Transition::Swap(l),
        (None, Some(r)) => Transition::Swap(r),
        (None, None) => Transition::Stay,
    }
}

/// Decide the transition for the cell at `(x, y)`.
pub fn decide<R: Rng + ?Sized>(
    grid: &Grid,
    x: usize,
    y: usize,
    rules: &RuleSet,
    rng: &mut R,
) -> Transition {
    let Some(cell) = grid.get(x, y) else {
        return Transition::Stay;
    };
    match cell.kind {
        CellKind::Empty | CellKind::Wood | CellKind::Stone => Transition::Stay,
        CellKind::Sand | CellKind::Ash => granular(grid, x, y, rng),
        CellKind::Water => water(grid, x, y, rng),
        CellKind::Fire => fire(grid, x, y, rules, rng),
        CellKind::Bomb => bomb(grid, x, y, cell.timer, rules),
    }
}

/// Sand and Ash: fall straight down, else slide to a free lower diagonal.
pub fn granular<R: Rng + ?Sized>(grid: &Grid, x: usize, y: usize, rng: &mut R) -> Transition {
    if y + 1 >= grid.height() {
        return Transition::Stay;
    }
    let p = Passable::Granular;
    if let Some(below) = open_target(grid, x, y, 0, 1, p) {
        return Transition::Swap(below);
    }
    either_side(
        open_target(grid, x, y, -1, 1, p),
        open_target(grid, x, y, 1, 1, p),
        rng,
    )
}

/// Water: fall, else spread diagonally down, else spread sideways.
///
/// Sideways flow is only considered once both lower diagonals are blocked, so
/// a body of water settles before it levels out.
pub fn water<R: Rng + ?Sized>(grid: &Grid, x: usize, y: usize, rng: &mut R) -> Transition {
    let p = Passable::Fluid;
    if let Some(below) = open_target(grid, x, y, 0, 1, p) {
        return Transition::Swap(below);
    }

    let down_left = open_target(grid, x, y, -1, 1, p);
    let down_right = open_target(grid, x, y, 1, 1, p);
    if down_left.is_none() && down_right.is_none() {
        either_side(
            open_target(grid, x, y, -1, 0, p),
            open_target(grid, x, y, 1, 0, p),
            rng,
        )
    } else {
        either_side(down_left, down_right, rng)
    }
}

/// Fire: quenched by any Water neighbor, spreads into Wood, else burns out.
pub fn fire<R: Rng + ?Sized>(
    grid: &Grid,
    x: usize,
    y: usize,
    rules: &RuleSet,
    rng: &mut R,
) -> Transition {
    let mut fuel = [0usize; NEIGHBORHOOD.len()];
    let mut found = 0;

    for (dx, dy) in NEIGHBORHOOD {
        let Some(index) = grid.neighbor(x, y, dx, dy) else {
            continue;
        };
        match grid.cell(index).map(|c| c.kind) {
            Some(CellKind::Water) => return Transition::Become(CellKind::Empty),
            Some(CellKind::Wood) => {
                fuel[found] = index;
                found += 1;
            }
            _ => {}
        }
    }

    if found == 0 {
        return Transition::Become(CellKind::Empty);
    }

    let r: f32 = rng.random();
    if r > rules.fire_act_threshold {
        return Transition::Stay;
    }

    let target = fuel[rng.random_range(0..found)];
    let leaves = if r < rules.fire_ash_bound {
        CellKind::Ash
    } else if r < rules.fire_persist_bound {
        CellKind::Fire
    } else {
        CellKind::Empty
    };
    Transition::Ignite { target, leaves }
}

/// Bomb: detonate next to Fire or once the fuse has run out.
pub fn bomb(grid: &Grid, x: usize, y: usize, timer: u16, rules: &RuleSet) -> Transition {
    let fire_adjacent = NEIGHBORHOOD
        .iter()
        .filter_map(|&(dx, dy)| grid.neighbor(x, y, dx, dy))
        .any(|index| grid.cell(index).is_some_and(|c| c.kind == CellKind::Fire));

    if fire_adjacent || timer.saturating_add(1) >= rules.bomb_fuse_ticks {
        Transition::Detonate
    } else {
        Transition::Fuse
    }
}
