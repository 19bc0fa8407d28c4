//! Falling Sand Core Library
//!
//! A falling-sand cellular automaton: a fixed grid of cells (sand, water,
//! stone, wood, ash, fire, bombs) advanced one tick at a time by a single
//! bottom-up pass that visits every cell at most once.
//!
//! ## Update model
//!
//! - Rows are processed bottom to top, columns in a per-tick shuffled order
//!   rotated before every row
//! - Each cell's rule returns a [`Transition`]; the engine applies it
//! - Sand and ash fall and pile, water falls and levels out
//! - Fire spreads through wood and is quenched by water
//! - Bombs detonate on a fuse or next to fire and reshape their surroundings
//!
//! ## Sharing
//!
//! [`SimContext`] holds the grid and the paint cursor behind two locks so an
//! input thread can paint while the [`Simulation`] loop ticks and renders.

// Data model
pub mod cell;
pub mod grid;
pub mod order;
pub mod rules;

// Update pass
pub mod engine;

// Input side
pub mod cursor;
pub mod paint;

// Threading and pacing
pub mod scheduler;
pub mod simulation;
pub mod sync;

// Render support
pub mod flicker;

pub use cell::{Cell, CellKind};
pub use cursor::{Cursor, Footprint, MAX_BRUSH_SIZE};
pub use engine::{apply_tick, BlastReport, TickStats, Transition, UpdateEngine};
pub use flicker::{fire_flicker, Spark};
pub use grid::{Census, Grid, GridError};
pub use order::RowOrder;
pub use paint::{paint, paint_region, Stroke};
pub use rules::{HalfExtent, RuleSet};
pub use scheduler::{TickScheduler, DEFAULT_TPS};
pub use simulation::Simulation;
pub use sync::{SceneGuard, SimContext};
