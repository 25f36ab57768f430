//! Equal-weight growth.

use crate::model::GrowthModel;
use lichtenberg_core::{CellGrid, Point};

/// Every frontier cell gets weight 1.0.
///
/// This is the model a simulator uses when none is supplied.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uniform;

impl GrowthModel for Uniform {
    fn name(&self) -> &str {
        "uniform"
    }

    fn weight_at(&self, _grid: &CellGrid, _p: Point) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_is_one_everywhere() {
        let grid = CellGrid::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(Uniform.weight_at(&grid, Point::new(x, y)), 1.0);
            }
        }
        assert!(Uniform.potential_at(Point::new(0, 0)).is_none());
        assert!(Uniform.dimensions().is_none());
    }
}
