//! Randomized column visiting order for one engine pass
//!
//! A fixed left-to-right scan makes granular cells drift one way: sand that
//! may fall either diagonal would always find the left slot freed first. The
//! engine instead visits columns in a shuffled order, shuffled once per tick
//! and rotated by a fresh random offset before every row. Rotating keeps the
//! per-row cost at one pass over the buffer while still changing which column
//! leads each row.

use rand::seq::SliceRandom;
use rand::Rng;

/// Reusable permutation of `0..width`.
#[derive(Debug, Clone)]
pub struct RowOrder {
    order: Vec<usize>,
}

impl RowOrder {
    /// Identity order over `width` columns.
    pub fn new(width: usize) -> Self {
        Self {
            order: (0..width).collect(),
        }
    }

    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the order covers no columns.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Uniform Fisher-Yates shuffle. Called once at the start of a tick.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
    }

    /// Rotate right by a uniformly random offset. Called before each row.
    pub fn rotate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.order.is_empty() {
            return;
        }
        let offset = rng.random_range(0..self.order.len());
        self.order.rotate_right(offset);
    }

    /// Columns in visiting order.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }
}
