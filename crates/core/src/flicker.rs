//! Fire flicker for renderers
//!
//! Burning cells throw sparks onto their neighbors each frame. The sparks are
//! pure decoration: they never change a cell's kind. A renderer that paints
//! in row-major order asks for the sparks of each Fire cell as it reaches it,
//! draws them, and then skips any spark target it has not reached yet so the
//! spark survives the rest of the frame.

use crate::grid::Grid;
use rand::Rng;

/// Neighbor offsets in row-major order.
const AROUND: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A spark drawn over one neighbor of a burning cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spark {
    pub x: usize,
    pub y: usize,
    /// Which fire glyph to draw (0 or 1)
    pub glyph: usize,
    /// Which fire color to draw (0 or 1)
    pub tint: usize,
}

/// Roll sparks around the Fire cell at `(x, y)` and append them to `out`.
///
/// Each in-bounds neighbor gets a spark with probability `chance`, clamped to
/// `[0, 1]` (NaN counts as zero). Neighbors
/// later in row-major order than `(x, y)` are flagged `skip_render`.
pub fn fire_flicker<R: Rng + ?Sized>(
    grid: &mut Grid,
    x: usize,
    y: usize,
    chance: f64,
    rng: &mut R,
    out: &mut Vec<Spark>,
) {
    let chance = if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    };
    let here = grid.index(x, y);
    for (dx, dy) in AROUND {
        let Some(index) = grid.neighbor(x, y, dx, dy) else {
            continue;
        };
        if !rng.random_bool(chance) {
            continue;
        }
        if index > here {
            if let Some(cell) = grid.cell_mut(index) {
                cell.skip_render = true;
            }
        }
        let (nx, ny) = grid.coords(index);
        out.push(Spark {
            x: nx,
            y: ny,
            glyph: rng.random_range(0..2),
            tint: rng.random_range(0..2),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_certain_flicker_covers_all_neighbors() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.get_mut(1, 1).unwrap().kind = CellKind::Fire;
        let mut rng = StdRng::seed_from_u64(0);
        let mut sparks = Vec::new();

        fire_flicker(&mut grid, 1, 1, 1.0, &mut rng, &mut sparks);

        assert_eq!(sparks.len(), 8);
        assert!(sparks.iter().all(|s| s.glyph < 2 && s.tint < 2));
        // Only cells after the centre in paint order are skipped
        for (i, cell) in grid.cells().iter().enumerate() {
            assert_eq!(cell.skip_render, i > 4, "cell {}", i);
        }
        assert_eq!(grid.kind_at(0, 0), Some(CellKind::Empty));
    }

    #[test]
    fn test_no_flicker_at_zero_chance() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut sparks = Vec::new();
        fire_flicker(&mut grid, 1, 1, 0.0, &mut rng, &mut sparks);
        assert!(sparks.is_empty());
        assert!(grid.cells().iter().all(|c| !c.skip_render));
    }

    #[test]
    fn test_out_of_range_chance_is_clamped() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut sparks = Vec::new();

        fire_flicker(&mut grid, 1, 1, 1.5, &mut rng, &mut sparks);
        assert_eq!(sparks.len(), 8);

        sparks.clear();
        fire_flicker(&mut grid, 1, 1, -0.5, &mut rng, &mut sparks);
        fire_flicker(&mut grid, 1, 1, f64::NAN, &mut rng, &mut sparks);
        assert!(sparks.is_empty());
    }

    #[test]
    fn test_corner_sparks_stay_in_bounds() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut sparks = Vec::new();
        fire_flicker(&mut grid, 3, 3, 1.0, &mut rng, &mut sparks);
        assert_eq!(sparks.len(), 3);
        assert!(sparks.iter().all(|s| s.x < 4 && s.y < 4));
    }

    #[test]
    fn test_flicker_rate() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let mut sparks = Vec::new();
        for _ in 0..1000 {
            fire_flicker(&mut grid, 1, 1, 0.3, &mut rng, &mut sparks);
        }
        let rate = sparks.len() as f64 / 8000.0;
        approx::assert_abs_diff_eq!(rate, 0.3, epsilon = 0.03);
    }
}
