//! Per-loop context handed to growth models.

use lichtenberg_core::{CellGrid, Point};
use rand_chacha::ChaCha8Rng;

/// What a model sees when the simulator asks it to get ready for a loop.
///
/// Holds the live grid, the frontier in the order the simulator will
/// query it, the cells broken since the previous call, and the
/// simulator's RNG. Models that need randomness draw from this RNG and
/// never keep their own, so one seed determines the whole run.
pub struct GrowthContext<'a> {
    grid: &'a CellGrid,
    frontier: &'a [Point],
    fresh: &'a [Point],
    rng: &'a mut ChaCha8Rng,
}

impl<'a> GrowthContext<'a> {
    /// Construct a context.
    ///
    /// Typically called by the simulator, not by models directly.
    pub fn new(
        grid: &'a CellGrid,
        frontier: &'a [Point],
        fresh: &'a [Point],
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        Self {
            grid,
            frontier,
            fresh,
            rng,
        }
    }

    /// The grid as of the end of the previous loop.
    pub fn grid(&self) -> &CellGrid {
        self.grid
    }

    /// Current growth candidates.
    pub fn frontier(&self) -> &[Point] {
        self.frontier
    }

    /// Cells broken since the previous `prepare`.
    ///
    /// On the first loop of a run this holds every broken cell, seeds
    /// included.
    pub fn fresh(&self) -> &[Point] {
        self.fresh
    }

    /// The simulator's random source.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        self.rng
    }
}
