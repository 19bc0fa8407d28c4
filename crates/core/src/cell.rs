//! Cell model
//!
//! A cell is the value held at one grid position: its material kind plus the
//! small amount of per-tick bookkeeping the engine and renderer need.

use serde::{Deserialize, Serialize};

/// Material held by a cell.
///
/// The discriminants double as the brush hotkeys (`0`-`7`) and the order of
/// the cell picker, so new kinds must be appended.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty = 0,
    Sand = 1,
    Water = 2,
    Stone = 3,
    Wood = 4,
    Ash = 5,
    Fire = 6,
    Bomb = 7,
}

impl CellKind {
    /// Every kind, in discriminant order.
    pub const ALL: [CellKind; 8] = [
        CellKind::Empty,
        CellKind::Sand,
        CellKind::Water,
        CellKind::Stone,
        CellKind::Wood,
        CellKind::Ash,
        CellKind::Fire,
        CellKind::Bomb,
    ];

    /// Number of distinct kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Look a kind up by its discriminant.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Discriminant of this kind.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human readable name, as shown in the status line and cell picker.
    pub fn name(self) -> &'static str {
        match self {
            CellKind::Empty => "Empty",
            CellKind::Sand => "Sand",
            CellKind::Water => "Water",
            CellKind::Stone => "Stone",
            CellKind::Wood => "Wood",
            CellKind::Ash => "Ash",
            CellKind::Fire => "Fire",
            CellKind::Bomb => "Bomb",
        }
    }

    /// Next kind in picker order, saturating at the last one.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    /// Previous kind in picker order, saturating at the first one.
    pub fn prev(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(self)
    }
}

/// State stored at one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Material held by the cell
    pub kind: CellKind,
    /// Skip this cell once during the current (or next) engine pass
    pub skip_update: bool,
    /// Renderer already painted this position for the current frame
    pub skip_render: bool,
    /// Fuse counter, only meaningful for [`CellKind::Bomb`]
    pub timer: u16,
}

impl Cell {
    /// Fresh cell of the given kind with all bookkeeping cleared.
    pub fn new(kind: CellKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Read and clear the render skip flag.
    pub fn take_skip_render(&mut self) -> bool {
        std::mem::take(&mut self.skip_render)
    }

    /// Read and clear the update skip flag.
    pub fn take_skip_update(&mut self) -> bool {
        std::mem::take(&mut self.skip_update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip_matches_hotkeys() {
        for (i, kind) in CellKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(CellKind::from_index(i), Some(*kind));
        }
        assert_eq!(CellKind::from_index(CellKind::COUNT), None);
    }

    #[test]
    fn test_next_prev_saturate() {
        assert_eq!(CellKind::Empty.prev(), CellKind::Empty);
        assert_eq!(CellKind::Bomb.next(), CellKind::Bomb);
        assert_eq!(CellKind::Sand.next(), CellKind::Water);
        assert_eq!(CellKind::Sand.prev(), CellKind::Empty);
    }

    #[test]
    fn test_take_flags_clear_them() {
        let mut cell = Cell::new(CellKind::Fire);
        cell.skip_render = true;
        cell.skip_update = true;

        assert!(cell.take_skip_render());
        assert!(!cell.take_skip_render());
        assert!(cell.take_skip_update());
        assert!(!cell.skip_update);
    }
}
