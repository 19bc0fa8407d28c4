//! Starting layouts for headless runs

use clap::ValueEnum;
use falling_sand_core::{paint, CellKind, Grid};
use rand::Rng;

/// Smallest grid every scenario fits on.
pub const MIN_WIDTH: usize = 8;
pub const MIN_HEIGHT: usize = 8;

/// Which layout to start from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Half the cells Sand, half Empty
    Random,
    /// A stack of wood lit from above, next to a pool of water
    Bonfire,
    /// Stone towers on a sand floor with bombs at their base
    Demolition,
}

impl Scenario {
    /// Lay the scenario out on an empty grid.
    pub fn build<R: Rng + ?Sized>(self, grid: &mut Grid, rng: &mut R) {
        match self {
            Scenario::Random => grid.seed_random(rng),
            Scenario::Bonfire => bonfire(grid),
            Scenario::Demolition => demolition(grid),
        }
    }
}

/// Fill the inclusive rectangle `[x0, x1] × [y0, y1]` with `kind`, clipped.
fn fill(grid: &mut Grid, (x0, x1): (usize, usize), (y0, y1): (usize, usize), kind: CellKind) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            paint(grid, x, y, kind);
        }
    }
}

fn bonfire(grid: &mut Grid) {
    let (w, h) = (grid.width(), grid.height());
    let bottom = h - 1;

    // Stone basin on the right
    let basin = w * 2 / 3;
    fill(grid, (basin, w - 1), (bottom, bottom), CellKind::Stone);
    fill(grid, (basin, basin), (h * 2 / 3, bottom), CellKind::Stone);
    fill(grid, (basin + 1, w - 1), (h * 2 / 3, bottom - 1), CellKind::Water);

    // Wood pile on the left, lit along its top
    let pile_top = h / 2;
    fill(grid, (w / 8, w / 2), (pile_top, bottom), CellKind::Wood);
    fill(grid, (w / 8, w / 2), (pile_top - 1, pile_top - 1), CellKind::Fire);
}

fn demolition(grid: &mut Grid) {
    let (w, h) = (grid.width(), grid.height());
    let bottom = h - 1;
    let floor = h * 3 / 4;

    fill(grid, (0, w - 1), (floor, bottom), CellKind::Sand);
    for tower in 1..=3 {
        let x = w * tower / 4;
        fill(grid, (x.saturating_sub(1), x + 1), (h / 4, floor - 1), CellKind::Stone);
        paint(grid, x, floor - 1, CellKind::Bomb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn built(scenario: Scenario, width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        scenario.build(&mut grid, &mut StdRng::seed_from_u64(3));
        grid
    }

    #[test]
    fn test_random_is_sand_and_empty() {
        let census = built(Scenario::Random, 40, 20).census();
        assert_eq!(census.occupied(), census.count(CellKind::Sand));
        assert!(census.count(CellKind::Sand) > 200);
        assert!(census.count(CellKind::Empty) > 200);
    }

    #[test]
    fn test_bonfire_has_fuel_flame_and_water() {
        let census = built(Scenario::Bonfire, 60, 24).census();
        assert!(census.count(CellKind::Wood) > 0);
        assert!(census.count(CellKind::Fire) > 0);
        assert!(census.count(CellKind::Water) > 0);
        assert!(census.count(CellKind::Stone) > 0);
    }

    #[test]
    fn test_demolition_places_three_bombs() {
        let census = built(Scenario::Demolition, 60, 24).census();
        assert_eq!(census.count(CellKind::Bomb), 3);
        assert!(census.count(CellKind::Stone) > 0);
    }

    #[test]
    fn test_scenarios_fit_smallest_grid() {
        for scenario in Scenario::value_variants() {
            let grid = built(*scenario, MIN_WIDTH, MIN_HEIGHT);
            assert!(grid.census().occupied() > 0);
        }
    }
}
