//! Fixed-size 2D cell grid with explicit neighbor addressing
//!
//! Cells are stored in row-major order (`index = y * width + x`). The grid has
//! no wraparound and no sentinel border: every neighbor lookup goes through
//! [`Grid::neighbor`] or [`Grid::has_neighbor`], which reject positions
//! outside `[0, width) × [0, height)` instead of aliasing another cell.

use crate::cell::{Cell, CellKind};
use rand::Rng;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::info;

/// Errors raised while constructing a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height was zero
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },

    /// `width * height` does not fit in memory indices
    #[error("grid of {width}x{height} cells is too large to address")]
    TooLarge { width: usize, height: usize },
}

/// Rectangular array of cells, sized once and never resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Cells in row-major order: `[y * width + x]`
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-Empty grid.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;

        info!("Allocated {}x{} grid ({} cells)", width, height, len);

        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index of `(x, y)`. Callers must have checked bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.in_bounds(x, y));
        y * self.width + x
    }

    /// `(x, y)` of a linear index.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Check that `(x, y)` addresses a cell.
    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Check that `(x + dx, y + dy)` addresses a cell.
    #[inline]
    pub fn has_neighbor(&self, x: usize, y: usize, dx: isize, dy: isize) -> bool {
        self.neighbor(x, y, dx, dy).is_some()
    }

    /// Linear index of `(x + dx, y + dy)`, or `None` when it falls off the grid.
    #[inline]
    pub fn neighbor(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<usize> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        if self.in_bounds(nx, ny) {
            Some(ny * self.width + nx)
        } else {
            None
        }
    }

    /// Cell at `(x, y)`, bounds-checked.
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Mutable cell at `(x, y)`, bounds-checked.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            self.cells.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    /// Kind at `(x, y)`, or `None` off the grid.
    pub fn kind_at(&self, x: usize, y: usize) -> Option<CellKind> {
        self.get(x, y).map(|c| c.kind)
    }

    /// Cell at a linear index, bounds-checked.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Mutable cell at a linear index, bounds-checked.
    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Exchange two cells, flags and timers included.
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    /// Reset every cell to a fresh Empty cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Fill the grid with an even random mix of Empty and Sand.
    pub fn seed_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = if rng.random_bool(0.5) {
                Cell::new(CellKind::Sand)
            } else {
                Cell::default()
            };
        }
    }

    /// Count cells per kind.
    pub fn census(&self) -> Census {
        let mut counts = FxHashMap::default();
        for cell in &self.cells {
            *counts.entry(cell.kind).or_insert(0) += 1;
        }
        Census { counts }
    }
}

/// Number of cells of each kind at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Census {
    counts: FxHashMap<CellKind, usize>,
}

impl Census {
    /// Cells of `kind`.
    pub fn count(&self, kind: CellKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Cells that are not Empty.
    pub fn occupied(&self) -> usize {
        self.counts
            .iter()
            .filter(|(kind, _)| **kind != CellKind::Empty)
            .map(|(_, n)| n)
            .sum()
    }

    /// Iterate `(kind, count)` in discriminant order, skipping absent kinds.
    pub fn iter(&self) -> impl Iterator<Item = (CellKind, usize)> + '_ {
        CellKind::ALL
            .into_iter()
            .map(|kind| (kind, self.count(kind)))
            .filter(|(_, n)| *n > 0)
    }
}
