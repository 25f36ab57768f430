//! The set of free cells the structure can grow into next.

use indexmap::IndexSet;
use lichtenberg_core::{CellGrid, Point};
use lichtenberg_space::Space;

/// Growth candidates in a deterministic order.
///
/// Order depends only on the sequence of inserts and removals, so two
/// runs with the same seed enumerate candidates identically.
#[derive(Clone, Debug, Default)]
pub(crate) struct Frontier {
    cells: IndexSet<Point>,
}

fn is_open(grid: &CellGrid, p: Point) -> bool {
    grid.cell(p.x, p.y).is_ok_and(|c| c.is_free())
}

impl Frontier {
    /// Every open cell one allowed step from a broken cell, scanning
    /// broken cells in row-major order.
    pub(crate) fn build(grid: &CellGrid, space: &dyn Space) -> Self {
        let mut frontier = Self::default();
        for p in grid.broken_points() {
            frontier.extend_from(grid, space, p);
        }
        frontier
    }

    /// Add the open growth targets of the broken cell `p`.
    pub(crate) fn extend_from(&mut self, grid: &CellGrid, space: &dyn Space, p: Point) {
        for q in space.growth_targets(p) {
            if is_open(grid, q) {
                self.cells.insert(q);
            }
        }
    }

    pub(crate) fn remove(&mut self, p: Point) -> bool {
        self.cells.swap_remove(&p)
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn to_vec(&self) -> Vec<Point> {
        self.cells.iter().copied().collect()
    }
}
