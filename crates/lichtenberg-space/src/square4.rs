//! 2D square lattice with 4-connected growth (N, S, W, E).

use crate::directions::Directions;
use crate::grid2d::{self, Offsets};
use crate::space::Space;
use lichtenberg_core::GrowthError;

/// Cardinal offsets as `(dx, dy)`: up, down, left, right.
const OFFSETS_4: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// A bounded square lattice where growth moves one cardinal step.
///
/// Edges absorb: cells on the border simply have fewer neighbours.
#[derive(Debug, Clone)]
pub struct Square4 {
    width: i32,
    height: i32,
    directions: Directions,
    offsets: Offsets,
}

impl Square4 {
    /// Create a `width x height` lattice with the given direction enables.
    ///
    /// Returns `Err(GrowthError::InvalidSize)` if either dimension is `<= 0`.
    pub fn new(width: i32, height: i32, directions: Directions) -> Result<Self, GrowthError> {
        grid2d::check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            directions,
            offsets: grid2d::permitted(&OFFSETS_4, directions),
        })
    }

    /// The direction enables this lattice was built with.
    pub fn directions(&self) -> Directions {
        self.directions
    }
}

impl Space for Square4 {
    fn name(&self) -> &'static str {
        "square4"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use lichtenberg_core::Point;
    use proptest::prelude::*;

    fn all(w: i32, h: i32) -> Square4 {
        Square4::new(w, h, Directions::ALL).unwrap()
    }

    #[test]
    fn targets_interior() {
        let s = all(5, 5);
        let t = s.growth_targets(Point::new(2, 2));
        assert_eq!(
            t.as_slice(),
            &[
                Point::new(2, 1),
                Point::new(2, 3),
                Point::new(1, 2),
                Point::new(3, 2)
            ]
        );
    }

    #[test]
    fn targets_absorb_corner() {
        let s = all(5, 5);
        let t = s.growth_targets(Point::new(0, 0));
        assert_eq!(t.as_slice(), &[Point::new(0, 1), Point::new(1, 0)]);
    }

    #[test]
    fn disabled_direction_removed_from_both_views() {
        let s = Square4::new(5, 5, Directions::new(false, true, true, true)).unwrap();
        let p = Point::new(2, 2);
        assert!(!s.growth_targets(p).contains(&Point::new(2, 1)));
        // (2, 3) can only have come from (2, 2) moving down, so the cell
        // above is still a source.
        assert!(s.growth_sources(Point::new(2, 3)).contains(&p));
        assert!(!s.growth_sources(Point::new(2, 1)).contains(&p));
    }

    #[test]
    fn new_rejects_empty() {
        assert!(matches!(
            Square4::new(0, 3, Directions::ALL),
            Err(GrowthError::InvalidSize { .. })
        ));
        assert!(Square4::new(3, -1, Directions::ALL).is_err());
    }

    #[test]
    fn compliance_all_directions() {
        compliance::run_full_compliance(&all(4, 3));
    }

    #[test]
    fn compliance_partial_directions() {
        let s = Square4::new(4, 4, Directions::new(true, false, false, true)).unwrap();
        compliance::run_full_compliance(&s);
    }

    proptest! {
        #[test]
        fn targets_are_adjacent_and_in_bounds(
            w in 1i32..10, h in 1i32..10, x in 0i32..10, y in 0i32..10,
        ) {
            let s = all(w, h);
            let p = Point::new(x % w, y % h);
            for q in s.growth_targets(p) {
                prop_assert!(s.contains(q));
                prop_assert_eq!((q.x - p.x).abs() + (q.y - p.y).abs(), 1);
            }
        }
    }
}
