//! Paint cursor and brush
//!
//! The cursor is owned by the input side. It never touches the grid itself;
//! painting goes through [`crate::paint`] using the footprint computed here.

use crate::cell::CellKind;
use tracing::debug;

/// Largest brush size reachable from the keyboard or mouse wheel.
pub const MAX_BRUSH_SIZE: u16 = 99;

/// Cursor position, selected brush and brush size.
///
/// Positions are always inside the grid the cursor was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    x: usize,
    y: usize,
    brush: CellKind,
    brush_size: u16,
    width: usize,
    height: usize,
    /// Whether the cell picker overlay is showing
    picker_open: bool,
}

impl Cursor {
    /// Cursor for a `width × height` grid, starting near the top-left corner
    /// with a size-1 Sand brush.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            x: 0,
            y: 2.min(height.saturating_sub(1)),
            brush: CellKind::Sand,
            brush_size: 1,
            width,
            height,
            picker_open: false,
        }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Dimensions of the grid the cursor moves over.
    pub fn grid_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn brush(&self) -> CellKind {
        self.brush
    }

    pub fn brush_size(&self) -> u16 {
        self.brush_size
    }

    /// Move by `(dx, dy)`, stopping at the grid edges.
    pub fn move_by(&mut self, dx: isize, dy: isize) {
        self.x = clamp_step(self.x, dx, self.width);
        self.y = clamp_step(self.y, dy, self.height);
    }

    /// Jump to a pointer position. Each axis is only taken when it lies
    /// inside the grid, so dragging past an edge keeps the other axis live.
    pub fn jump_to(&mut self, x: Option<usize>, y: Option<usize>) {
        if let Some(x) = x.filter(|&x| x < self.width) {
            self.x = x;
        }
        if let Some(y) = y.filter(|&y| y < self.height) {
            self.y = y;
        }
    }

    pub fn select_brush(&mut self, kind: CellKind) {
        if self.brush != kind {
            debug!("Brush set to {}", kind.name());
        }
        self.brush = kind;
    }

    /// Select the brush whose hotkey is `digit`. Unknown digits are ignored.
    pub fn select_brush_by_index(&mut self, digit: usize) -> bool {
        match CellKind::from_index(digit) {
            Some(kind) => {
                self.select_brush(kind);
                true
            }
            None => false,
        }
    }

    pub fn next_brush(&mut self) {
        self.select_brush(self.brush.next());
    }

    pub fn prev_brush(&mut self) {
        self.select_brush(self.brush.prev());
    }

    pub fn grow_brush(&mut self) {
        if self.brush_size < MAX_BRUSH_SIZE {
            self.brush_size += 1;
        }
    }

    pub fn shrink_brush(&mut self) {
        if self.brush_size > 1 {
            self.brush_size -= 1;
        }
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn open_picker(&mut self) {
        self.picker_open = true;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    /// Cells the brush covers at the current position.
    pub fn footprint(&self) -> Footprint {
        Footprint::around(
            self.x,
            self.y,
            self.brush_size,
            self.width,
            self.height,
        )
    }
}

fn clamp_step(pos: usize, delta: isize, len: usize) -> usize {
    pos.saturating_add_signed(delta)
        .min(len.saturating_sub(1))
}

/// Inclusive rectangle of cells covered by a brush.
///
/// A brush of size `s` spans `2s - 1` columns and `2(s / 2) + 1` rows, so it
/// looks roughly square on a terminal whose cells are twice as tall as wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
}

impl Footprint {
    /// Footprint of a size-`size` brush at `(x, y)`, clipped to the grid.
    pub fn around(x: usize, y: usize, size: u16, width: usize, height: usize) -> Self {
        let reach_x = usize::from(size.max(1) - 1);
        let reach_y = usize::from(size / 2);
        Self {
            x0: x.saturating_sub(reach_x),
            x1: (x + reach_x).min(width.saturating_sub(1)),
            y0: y.saturating_sub(reach_y),
            y1: (y + reach_y).min(height.saturating_sub(1)),
        }
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x0..=self.x1).contains(&x) && (self.y0..=self.y1).contains(&y)
    }

    /// Every covered `(x, y)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..=self.y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor_defaults() {
        let cursor = Cursor::new(80, 24);
        assert_eq!(cursor.position(), (0, 2));
        assert_eq!(cursor.brush(), CellKind::Sand);
        assert_eq!(cursor.brush_size(), 1);
        assert!(!cursor.is_picker_open());

        // Start row is clamped on very short grids
        assert_eq!(Cursor::new(5, 2).y(), 1);
    }

    #[test]
    fn test_move_clamps_to_grid() {
        let mut cursor = Cursor::new(4, 3);
        cursor.move_by(-1, -5);
        assert_eq!(cursor.position(), (0, 0));
        cursor.move_by(10, 10);
        assert_eq!(cursor.position(), (3, 2));
        cursor.move_by(-1, 0);
        assert_eq!(cursor.position(), (2, 2));
    }

    #[test]
    fn test_jump_takes_only_in_range_axes() {
        let mut cursor = Cursor::new(10, 5);
        cursor.jump_to(Some(7), Some(9));
        assert_eq!(cursor.position(), (7, 2));
        cursor.jump_to(None, Some(4));
        assert_eq!(cursor.position(), (7, 4));
        cursor.jump_to(Some(10), None);
        assert_eq!(cursor.position(), (7, 4));
    }

    #[test]
    fn test_brush_size_bounds() {
        let mut cursor = Cursor::new(10, 10);
        cursor.shrink_brush();
        assert_eq!(cursor.brush_size(), 1);
        for _ in 0..200 {
            cursor.grow_brush();
        }
        assert_eq!(cursor.brush_size(), MAX_BRUSH_SIZE);
    }

    #[test]
    fn test_brush_selection() {
        let mut cursor = Cursor::new(10, 10);
        assert!(cursor.select_brush_by_index(7));
        assert_eq!(cursor.brush(), CellKind::Bomb);
        assert!(!cursor.select_brush_by_index(8));
        assert_eq!(cursor.brush(), CellKind::Bomb);

        cursor.next_brush();
        assert_eq!(cursor.brush(), CellKind::Bomb);
        cursor.prev_brush();
        assert_eq!(cursor.brush(), CellKind::Fire);
    }

    #[test]
    fn test_footprint_shape() {
        let single = Footprint::around(5, 5, 1, 20, 20);
        assert_eq!(single.cells().collect::<Vec<_>>(), vec![(5, 5)]);

        let fp = Footprint::around(5, 5, 3, 20, 20);
        assert_eq!((fp.x0, fp.x1, fp.y0, fp.y1), (3, 7, 4, 6));
        assert_eq!(fp.cells().count(), 15);
        assert!(fp.contains(3, 4));
        assert!(!fp.contains(8, 5));
    }

    #[test]
    fn test_footprint_clipped_at_edges() {
        let fp = Footprint::around(0, 0, 4, 3, 2);
        assert_eq!((fp.x0, fp.x1, fp.y0, fp.y1), (0, 2, 0, 1));
        assert_eq!(fp.cells().count(), 6);
    }
}
