//! Direct grid edits from the input side
//!
//! Callers must hold exclusive access to the grid, the same as for a tick.

use crate::cell::{Cell, CellKind};
use crate::cursor::Footprint;
use crate::grid::Grid;

/// What a brush stroke writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// Write the given kind
    Paint(CellKind),
    /// Write Empty
    Erase,
}

impl Stroke {
    pub fn kind(self) -> CellKind {
        match self {
            Stroke::Paint(kind) => kind,
            Stroke::Erase => CellKind::Empty,
        }
    }
}

/// Overwrite one cell with a fresh cell of `kind`. Returns false when
/// `(x, y)` is off the grid.
///
/// Flags and timer are reset, so a painted Bomb starts a full fuse.
pub fn paint(grid: &mut Grid, x: usize, y: usize, kind: CellKind) -> bool {
    match grid.get_mut(x, y) {
        Some(cell) => {
            *cell = Cell::new(kind);
            true
        }
        None => false,
    }
}

/// Apply `stroke` to the brush footprint centred on `center`. Returns the
/// number of cells written.
pub fn paint_region(
    grid: &mut Grid,
    center: (usize, usize),
    brush_size: u16,
    stroke: Stroke,
) -> usize {
    let (cx, cy) = center;
    if !grid.in_bounds(cx, cy) {
        return 0;
    }
    let footprint = Footprint::around(cx, cy, brush_size, grid.width(), grid.height());
    let kind = stroke.kind();
    footprint
        .cells()
        .filter(|&(x, y)| paint(grid, x, y, kind))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_resets_bookkeeping() {
        let mut grid = Grid::new(3, 3).unwrap();
        {
            let cell = grid.get_mut(1, 1).unwrap();
            cell.kind = CellKind::Bomb;
            cell.timer = 40;
            cell.skip_update = true;
        }
        assert!(paint(&mut grid, 1, 1, CellKind::Bomb));
        assert_eq!(*grid.get(1, 1).unwrap(), Cell::new(CellKind::Bomb));
        assert!(!paint(&mut grid, 3, 0, CellKind::Sand));
    }

    #[test]
    fn test_paint_region_covers_footprint() {
        let mut grid = Grid::new(10, 10).unwrap();
        let written = paint_region(&mut grid, (5, 5), 2, Stroke::Paint(CellKind::Stone));
        // Three columns by three rows
        assert_eq!(written, 9);
        assert_eq!(grid.census().count(CellKind::Stone), 9);
        assert_eq!(grid.kind_at(4, 4), Some(CellKind::Stone));
        assert_eq!(grid.kind_at(6, 6), Some(CellKind::Stone));
        assert_eq!(grid.kind_at(7, 5), Some(CellKind::Empty));
    }

    #[test]
    fn test_erase_clips_at_corner() {
        let mut grid = Grid::new(4, 4).unwrap();
        for x in 0..4 {
            paint(&mut grid, x, 0, CellKind::Sand);
            paint(&mut grid, x, 1, CellKind::Sand);
        }
        let written = paint_region(&mut grid, (0, 0), 3, Stroke::Erase);
        assert_eq!(written, 3 * 2);
        assert_eq!(grid.kind_at(3, 0), Some(CellKind::Sand));
        assert_eq!(grid.census().count(CellKind::Sand), 2);
    }

    #[test]
    fn test_off_grid_center_writes_nothing() {
        let mut grid = Grid::new(4, 4).unwrap();
        assert_eq!(paint_region(&mut grid, (4, 1), 5, Stroke::Erase), 0);
    }
}
