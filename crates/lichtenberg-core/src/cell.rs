//! Per-coordinate cell records.

use crate::point::Point;

/// State of a single grid cell.
///
/// A cell is free, insulated, or broken. `count` and `parent` are only
/// meaningful for broken cells: roots have `parent == None` and
/// `count == 0`, and every other broken cell sits exactly one step
/// further from its root than its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Part of the discharge structure.
    pub broken: bool,
    /// Permanently excluded from growth.
    pub insulated: bool,
    /// Steps along the branch from the root.
    pub count: u32,
    /// The cell this one grew from. `None` for roots and free cells.
    pub parent: Option<Point>,
}

impl Cell {
    /// Neither broken nor insulated.
    #[inline]
    pub fn is_free(&self) -> bool {
        !self.broken && !self.insulated
    }

    /// Broken with no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.broken && self.parent.is_none()
    }
}
