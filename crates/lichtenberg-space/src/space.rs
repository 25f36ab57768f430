//! The lattice abstraction the growth loop walks.

use lichtenberg_core::Point;
use smallvec::SmallVec;
use std::fmt;

/// A bounded 2D lattice with a fixed set of growth offsets.
///
/// The simulator only ever asks two questions of a space: which cells a
/// broken cell may grow into ([`growth_targets`](Self::growth_targets)),
/// and which broken cells could have produced a given cell
/// ([`growth_sources`](Self::growth_sources)). Both answer in the
/// deterministic order of [`offsets`](Self::offsets), which is what the
/// parent tie-break and frontier insertion order rely on.
pub trait Space: Send + Sync + fmt::Debug + 'static {
    /// Short backend name, used in logs.
    fn name(&self) -> &'static str;

    /// Number of columns.
    fn width(&self) -> i32;

    /// Number of rows.
    fn height(&self) -> i32;

    /// Permitted growth offsets `(dx, dy)`, in backend order.
    fn offsets(&self) -> &[(i32, i32)];

    /// Total number of cells.
    fn cell_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Whether `p` lies inside the lattice.
    fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width() && p.y >= 0 && p.y < self.height()
    }

    /// In-bounds cells `p + d` for every permitted offset `d`.
    fn growth_targets(&self, p: Point) -> SmallVec<[Point; 8]> {
        self.offsets()
            .iter()
            .map(|&(dx, dy)| p.offset(dx, dy))
            .filter(|&q| self.contains(q))
            .collect()
    }

    /// In-bounds cells `c - d` for every permitted offset `d`.
    fn growth_sources(&self, c: Point) -> SmallVec<[Point; 8]> {
        self.offsets()
            .iter()
            .map(|&(dx, dy)| c.offset(-dx, -dy))
            .filter(|&q| self.contains(q))
            .collect()
    }
}
