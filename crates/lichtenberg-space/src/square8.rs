//! 2D square lattice with 8-connected growth (cardinal + diagonal).

use crate::directions::Directions;
use crate::grid2d::{self, Offsets};
use crate::space::Space;
use lichtenberg_core::GrowthError;

/// All 8 offsets as `(dx, dy)`: cardinals first, then diagonals.
const OFFSETS_8: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// A bounded square lattice where growth may also step diagonally.
///
/// Cardinal offsets come first, so shortest-path parent selection prefers
/// a cardinal parent when counts tie.
#[derive(Debug, Clone)]
pub struct Square8 {
    width: i32,
    height: i32,
    directions: Directions,
    offsets: Offsets,
}

impl Square8 {
    /// Create a `width x height` lattice with the given direction enables.
    ///
    /// Returns `Err(GrowthError::InvalidSize)` if either dimension is `<= 0`.
    pub fn new(width: i32, height: i32, directions: Directions) -> Result<Self, GrowthError> {
        grid2d::check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            directions,
            offsets: grid2d::permitted(&OFFSETS_8, directions),
        })
    }

    /// The direction enables this lattice was built with.
    pub fn directions(&self) -> Directions {
        self.directions
    }
}

impl Space for Square8 {
    fn name(&self) -> &'static str {
        "square8"
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }
}
