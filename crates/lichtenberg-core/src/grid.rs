//! The dense cell grid and its invariants.

use crate::cell::Cell;
use crate::error::GrowthError;
use crate::point::Point;

/// Largest number of cells a grid may hold.
///
/// Saved grids store cell indices as `u32`, so every grid that can be
/// built can also be written and read back.
pub const MAX_CELLS: u64 = u32::MAX as u64;

/// A fixed-size, row-major grid of [`Cell`]s.
///
/// The grid is the single source of truth for growth state. Its only
/// mutators are [`mark_broken`](Self::mark_broken) and
/// [`mark_insulated`](Self::mark_insulated), which together keep the
/// broken cells a forest:
///
/// - every non-root broken cell has a broken, Chebyshev-adjacent parent;
/// - `count(child) == count(parent) + 1`, so parent chains always
///   terminate at a root;
/// - growth never targets an insulated cell.
///
/// [`Default`] yields an empty 0x0 grid, which is only useful as a target
/// for loading a saved grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellGrid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    max_count: u32,
    broken: usize,
}

impl CellGrid {
    /// Create a grid with every cell free.
    ///
    /// Returns `Err(GrowthError::InvalidSize)` if either dimension is `<= 0`
    /// or `width * height` exceeds [`MAX_CELLS`].
    pub fn new(width: i32, height: i32) -> Result<Self, GrowthError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            max_count: 0,
            broken: 0,
        })
    }

    /// Rebuild a grid from raw row-major records.
    ///
    /// Every record is checked against the forest invariants, so a grid
    /// produced here is as trustworthy as one grown by the simulator.
    pub fn from_cells(width: i32, height: i32, cells: Vec<Cell>) -> Result<Self, GrowthError> {
        let len = checked_len(width, height)?;
        if cells.len() != len {
            return Err(GrowthError::ShapeMismatch {
                expected: format!("{len} cells ({width}x{height})"),
                found: format!("{} cells", cells.len()),
            });
        }

        let mut grid = Self {
            width,
            height,
            cells,
            max_count: 0,
            broken: 0,
        };
        for idx in 0..grid.cells.len() {
            let p = grid.point_of(idx);
            let cell = grid.cells[idx];
            if !cell.broken {
                if cell.count != 0 || cell.parent.is_some() {
                    return Err(GrowthError::transition(p, "free cell carries growth data"));
                }
                continue;
            }
            grid.check_growth(p, &cell, cell.parent, cell.count)?;
            grid.max_count = grid.max_count.max(cell.count);
            grid.broken += 1;
        }
        Ok(grid)
    }

    // ── Shape ───────────────────────────────────────────────────

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` for the empty default grid.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `true` once the grid has positive dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Whether `(x, y)` lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Flat row-major index of `(x, y)`.
    pub fn index_of(&self, x: i32, y: i32) -> Result<usize, GrowthError> {
        self.try_index(Point::new(x, y))
            .ok_or_else(|| GrowthError::out_of_bounds(Point::new(x, y), self.width, self.height))
    }

    /// Flat index of `p`, or `None` off the grid.
    #[inline]
    pub fn try_index(&self, p: Point) -> Option<usize> {
        if self.contains(p.x, p.y) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Coordinate of a flat index. The index must be `< len()`.
    #[inline]
    pub fn point_of(&self, index: usize) -> Point {
        let w = self.width as usize;
        Point::new((index % w) as i32, (index / w) as i32)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// The raw cell at `(x, y)`.
    pub fn cell(&self, x: i32, y: i32) -> Result<&Cell, GrowthError> {
        let idx = self.index_of(x, y)?;
        Ok(&self.cells[idx])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether `(x, y)` is part of the discharge structure.
    pub fn get_broken(&self, x: i32, y: i32) -> Result<bool, GrowthError> {
        Ok(self.cell(x, y)?.broken)
    }

    /// Whether `(x, y)` is insulated.
    pub fn get_insulated(&self, x: i32, y: i32) -> Result<bool, GrowthError> {
        Ok(self.cell(x, y)?.insulated)
    }

    /// Distance from the root along the branch. 0 for free cells.
    pub fn get_count(&self, x: i32, y: i32) -> Result<u32, GrowthError> {
        Ok(self.cell(x, y)?.count)
    }

    /// The cell `(x, y)` grew from.
    pub fn get_parent(&self, x: i32, y: i32) -> Result<Option<Point>, GrowthError> {
        Ok(self.cell(x, y)?.parent)
    }

    /// Largest `count` over all broken cells, 0 if none is broken.
    pub fn get_max_count(&self) -> u32 {
        self.max_count
    }

    /// Number of broken cells.
    pub fn broken_count(&self) -> usize {
        self.broken
    }

    /// Root coordinates in row-major order.
    pub fn roots(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_root())
            .map(|(i, _)| self.point_of(i))
    }

    /// Broken coordinates in row-major order.
    pub fn broken_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.broken)
            .map(|(i, _)| self.point_of(i))
    }

    // ── Mutators ────────────────────────────────────────────────

    /// Mark `(x, y)` broken with the given parent and count.
    ///
    /// Roots take `parent == None` and `count == 0`. Returns `Ok(false)`
    /// when the cell is already broken with exactly this parent and count.
    /// Any other re-break is an `InvalidTransition`.
    pub fn mark_broken(
        &mut self,
        x: i32,
        y: i32,
        parent: Option<Point>,
        count: u32,
    ) -> Result<bool, GrowthError> {
        let p = Point::new(x, y);
        let idx = self.index_of(x, y)?;
        let cell = self.cells[idx];
        if cell.broken {
            if cell.parent == parent && cell.count == count {
                return Ok(false);
            }
            return Err(GrowthError::transition(
                p,
                "already broken with a different parent",
            ));
        }
        self.check_growth(p, &cell, parent, count)?;

        let cell = &mut self.cells[idx];
        cell.broken = true;
        cell.parent = parent;
        cell.count = count;
        self.max_count = self.max_count.max(count);
        self.broken += 1;
        Ok(true)
    }

    /// Mark `(x, y)` insulated. Returns `Ok(false)` if it already was.
    ///
    /// Roots may be insulated (the simulator rejects them later); cells
    /// that grew from a parent may not.
    pub fn mark_insulated(&mut self, x: i32, y: i32) -> Result<bool, GrowthError> {
        let idx = self.index_of(x, y)?;
        let cell = &mut self.cells[idx];
        if cell.insulated {
            return Ok(false);
        }
        if cell.broken && cell.parent.is_some() {
            return Err(GrowthError::transition(
                Point::new(x, y),
                "a grown cell cannot be insulated",
            ));
        }
        cell.insulated = true;
        Ok(true)
    }

    /// Validate a prospective break of `cell` at `p`.
    fn check_growth(
        &self,
        p: Point,
        cell: &Cell,
        parent: Option<Point>,
        count: u32,
    ) -> Result<(), GrowthError> {
        let Some(parent) = parent else {
            if count != 0 {
                return Err(GrowthError::transition(p, "roots must have count 0"));
            }
            return Ok(());
        };
        if cell.insulated {
            return Err(GrowthError::transition(p, "insulated cells never grow"));
        }
        let parent_cell = self
            .try_index(parent)
            .map(|i| &self.cells[i])
            .filter(|c| c.broken)
            .ok_or_else(|| {
                GrowthError::transition(p, format!("parent {parent} is not a broken cell"))
            })?;
        if parent.chebyshev(p) != 1 {
            return Err(GrowthError::transition(
                p,
                format!("parent {parent} is not adjacent"),
            ));
        }
        if parent_cell.count.checked_add(1) != Some(count) {
            return Err(GrowthError::transition(
                p,
                format!(
                    "count {count} does not follow parent count {}",
                    parent_cell.count
                ),
            ));
        }
        Ok(())
    }
}

fn checked_len(width: i32, height: i32) -> Result<usize, GrowthError> {
    if width <= 0 || height <= 0 {
        return Err(GrowthError::InvalidSize { width, height });
    }
    // Both factors are below 2^31, so the product fits in u64.
    let cells = width as u64 * height as u64;
    if cells > MAX_CELLS {
        return Err(GrowthError::InvalidSize { width, height });
    }
    usize::try_from(cells)
        .ok()
        .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<Cell>())
        .ok_or(GrowthError::InvalidSize { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(w: i32, h: i32) -> CellGrid {
        CellGrid::new(w, h).unwrap()
    }

    #[test]
    fn new_grid_is_all_free() {
        let g = grid(4, 3);
        assert_eq!(g.len(), 12);
        assert!(g.cells().iter().all(Cell::is_free));
        assert_eq!(g.get_max_count(), 0);
        assert_eq!(g.broken_count(), 0);
    }

    #[test]
    fn default_grid_is_invalid() {
        let g = CellGrid::default();
        assert!(!g.is_valid());
        assert!(g.is_empty());
    }

    #[test]
    fn queries_reject_edges_outside() {
        let g = grid(3, 2);
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 2)] {
            assert!(matches!(
                g.get_broken(x, y),
                Err(GrowthError::OutOfBounds { .. })
            ));
            assert!(g.get_insulated(x, y).is_err());
            assert!(g.get_count(x, y).is_err());
        }
    }

    #[test]
    fn root_break_has_count_zero() {
        let mut g = grid(3, 3);
        assert!(g.mark_broken(1, 1, None, 0).unwrap());
        assert!(g.get_broken(1, 1).unwrap());
        assert_eq!(g.get_count(1, 1).unwrap(), 0);
        assert_eq!(g.roots().collect::<Vec<_>>(), vec![Point::new(1, 1)]);
    }

    #[test]
    fn root_with_nonzero_count_rejected() {
        let mut g = grid(3, 3);
        assert!(g.mark_broken(1, 1, None, 4).is_err());
    }

    #[test]
    fn rebreak_same_parent_is_noop() {
        let mut g = grid(3, 1);
        g.mark_broken(0, 0, None, 0).unwrap();
        assert!(g.mark_broken(1, 0, Some(Point::new(0, 0)), 1).unwrap());
        assert!(!g.mark_broken(1, 0, Some(Point::new(0, 0)), 1).unwrap());
        assert_eq!(g.broken_count(), 2);
    }

    #[test]
    fn rebreak_different_parent_rejected() {
        let mut g = grid(3, 1);
        g.mark_broken(0, 0, None, 0).unwrap();
        g.mark_broken(2, 0, None, 0).unwrap();
        g.mark_broken(1, 0, Some(Point::new(0, 0)), 1).unwrap();
        match g.mark_broken(1, 0, Some(Point::new(2, 0)), 1) {
            Err(GrowthError::InvalidTransition { x: 1, y: 0, .. }) => {}
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn growth_requires_broken_adjacent_parent() {
        let mut g = grid(4, 4);
        g.mark_broken(0, 0, None, 0).unwrap();
        // Parent not broken.
        assert!(g.mark_broken(2, 2, Some(Point::new(2, 1)), 1).is_err());
        // Parent too far away.
        assert!(g.mark_broken(2, 0, Some(Point::new(0, 0)), 1).is_err());
        // Wrong count.
        assert!(g.mark_broken(1, 0, Some(Point::new(0, 0)), 2).is_err());
        // Diagonal is adjacent.
        assert!(g.mark_broken(1, 1, Some(Point::new(0, 0)), 1).unwrap());
    }

    #[test]
    fn growth_into_insulated_rejected() {
        let mut g = grid(2, 1);
        g.mark_broken(0, 0, None, 0).unwrap();
        g.mark_insulated(1, 0).unwrap();
        assert!(g.mark_broken(1, 0, Some(Point::new(0, 0)), 1).is_err());
    }

    #[test]
    fn insulating_root_accepted_but_grown_cell_rejected() {
        let mut g = grid(2, 1);
        g.mark_broken(0, 0, None, 0).unwrap();
        g.mark_broken(1, 0, Some(Point::new(0, 0)), 1).unwrap();
        assert!(g.mark_insulated(0, 0).unwrap());
        assert!(g.mark_insulated(1, 0).is_err());
        assert!(!g.mark_insulated(0, 0).unwrap());
    }

    #[test]
    fn max_count_tracks_deepest_cell() {
        let mut g = grid(5, 1);
        g.mark_broken(0, 0, None, 0).unwrap();
        for x in 1..5 {
            g.mark_broken(x, 0, Some(Point::new(x - 1, 0)), x as u32)
                .unwrap();
        }
        assert_eq!(g.get_max_count(), 4);
    }

    #[test]
    fn from_cells_roundtrips_valid_grid() {
        let mut g = grid(3, 2);
        g.mark_broken(0, 0, None, 0).unwrap();
        g.mark_broken(1, 1, Some(Point::new(0, 0)), 1).unwrap();
        g.mark_insulated(2, 0).unwrap();
        let rebuilt = CellGrid::from_cells(3, 2, g.cells().to_vec()).unwrap();
        assert_eq!(rebuilt, g);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        let cells = vec![Cell::default(); 5];
        assert!(matches!(
            CellGrid::from_cells(3, 2, cells),
            Err(GrowthError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn from_cells_rejects_broken_chain() {
        let mut cells = vec![Cell::default(); 3];
        cells[0] = Cell {
            broken: true,
            ..Cell::default()
        };
        cells[2] = Cell {
            broken: true,
            insulated: false,
            count: 1,
            parent: Some(Point::new(1, 0)),
        };
        assert!(matches!(
            CellGrid::from_cells(3, 1, cells),
            Err(GrowthError::InvalidTransition { x: 2, y: 0, .. })
        ));
    }

    #[test]
    fn cell_count_is_capped_at_max_cells() {
        // 65_536 * 65_537 = 2^32 + 2^16, just past the cap.
        assert!(matches!(
            CellGrid::new(65_536, 65_537),
            Err(GrowthError::InvalidSize {
                width: 65_536,
                height: 65_537
            })
        ));
        assert!(matches!(
            CellGrid::new(i32::MAX, i32::MAX),
            Err(GrowthError::InvalidSize { .. })
        ));
        assert!(matches!(
            CellGrid::from_cells(65_536, 65_537, Vec::new()),
            Err(GrowthError::InvalidSize { .. })
        ));
    }

    proptest! {
        #[test]
        fn non_positive_sizes_rejected(w in -8i32..=0, h in -8i32..=8) {
            prop_assert!(
                matches!(CellGrid::new(w, h), Err(GrowthError::InvalidSize { .. })),
                "expected InvalidSize error"
            );
            prop_assert!(
                matches!(CellGrid::new(h, w), Err(GrowthError::InvalidSize { .. })),
                "expected InvalidSize error"
            );
        }

        #[test]
        fn positive_sizes_accepted(w in 1i32..64, h in 1i32..64) {
            let g = CellGrid::new(w, h).unwrap();
            prop_assert_eq!(g.len(), (w * h) as usize);
        }

        #[test]
        fn index_and_point_agree(w in 1i32..32, h in 1i32..32, x in 0i32..32, y in 0i32..32) {
            let g = CellGrid::new(w, h).unwrap();
            let (x, y) = (x % w, y % h);
            let idx = g.index_of(x, y).unwrap();
            prop_assert_eq!(g.point_of(idx), Point::new(x, y));
        }
    }
}
