//! Shared state between the simulation thread and the input thread
//!
//! Two locks guard disjoint data: one the grid, one the cursor. Whenever both
//! are needed they are taken grid first, then cursor, and only through
//! [`SimContext::lock_view`]. Input-side helpers never hold both at once:
//! they copy what they need out of the cursor and release it before touching
//! the grid.

use crate::cell::CellKind;
use crate::cursor::Cursor;
use crate::grid::Grid;
use crate::paint::{paint, paint_region, Stroke};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Grid, cursor and the shutdown flag, shared behind an `Arc`.
#[derive(Debug)]
pub struct SimContext {
    grid: Mutex<Grid>,
    cursor: Mutex<Cursor>,
    running: AtomicBool,
}

/// Both locks held together, acquired in the fixed order.
pub struct SceneGuard<'a> {
    pub grid: MutexGuard<'a, Grid>,
    pub cursor: MutexGuard<'a, Cursor>,
}

impl SimContext {
    /// Wrap `grid` with a fresh cursor sized to it.
    pub fn new(grid: Grid) -> Self {
        let cursor = Cursor::new(grid.width(), grid.height());
        Self {
            grid: Mutex::new(grid),
            cursor: Mutex::new(cursor),
            running: AtomicBool::new(true),
        }
    }

    /// Lock the grid. A poisoned lock is taken over as-is: cells are plain
    /// values and every combination of them is a valid grid.
    pub fn lock_grid(&self) -> MutexGuard<'_, Grid> {
        self.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn lock_cursor(&self) -> MutexGuard<'_, Cursor> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock grid then cursor, for rendering.
    pub fn lock_view(&self) -> SceneGuard<'_> {
        let grid = self.lock_grid();
        let cursor = self.lock_cursor();
        SceneGuard { grid, cursor }
    }

    /// Copy of the cursor, taken under its lock.
    pub fn cursor(&self) -> Cursor {
        *self.lock_cursor()
    }

    pub fn update_cursor<T>(&self, f: impl FnOnce(&mut Cursor) -> T) -> T {
        f(&mut *self.lock_cursor())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn request_shutdown(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            info!("Shutdown requested");
        }
    }

    /// Paint the brush footprint at the cursor (or erase it).
    pub fn stroke_at_cursor(&self, erase: bool) -> usize {
        let cursor = self.cursor();
        let stroke = if erase {
            Stroke::Erase
        } else {
            Stroke::Paint(cursor.brush())
        };
        paint_region(
            &mut self.lock_grid(),
            cursor.position(),
            cursor.brush_size(),
            stroke,
        )
    }

    /// Paint the single cell under the cursor with the selected brush.
    pub fn paint_at_cursor(&self) -> bool {
        let cursor = self.cursor();
        paint(
            &mut self.lock_grid(),
            cursor.x(),
            cursor.y(),
            cursor.brush(),
        )
    }

    /// Reset every cell to Empty.
    pub fn clear_grid(&self) {
        self.lock_grid().clear();
        info!("Grid cleared");
    }

    /// Overwrite one cell, taking the grid lock.
    pub fn paint(&self, x: usize, y: usize, kind: CellKind) -> bool {
        paint(&mut self.lock_grid(), x, y, kind)
    }
}
