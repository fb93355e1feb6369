//! Double-buffered grid storage.
//!
//! `grids[phase]` is the current generation (read), `grids[1 - phase]` is the
//! next generation (write). Swapping flips the phase; no cells are copied.

use super::error::LifeError;
use super::grid::Grid;

pub struct DoubleBuffer {
    grids: [Grid; 2],
    phase: usize,
}

impl DoubleBuffer {
    /// Take ownership of the initial grid and allocate a matching scratch grid.
    pub fn new(initial: Grid) -> Result<Self, LifeError> {
        let scratch = Grid::new(initial.rows(), initial.cols())?;
        Ok(Self {
            grids: [initial, scratch],
            phase: 0,
        })
    }

    #[inline]
    pub fn current(&self) -> &Grid {
        &self.grids[self.phase]
    }

    /// Borrow both sides for one generation: `(current, next)`.
    #[inline]
    pub fn split(&mut self) -> (&Grid, &mut Grid) {
        let [a, b] = &mut self.grids;
        if self.phase == 0 { (&*a, b) } else { (&*b, a) }
    }

    #[inline]
    pub fn swap(&mut self) {
        self.phase = 1 - self.phase;
    }

    /// Consume the buffer, keeping whichever grid holds the latest generation.
    pub fn into_current(self) -> Grid {
        let [a, b] = self.grids;
        if self.phase == 0 { a } else { b }
    }
}
