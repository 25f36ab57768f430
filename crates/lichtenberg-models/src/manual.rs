//! Growth weighted by a caller-supplied probability map.

use crate::model::{self, GrowthModel};
use lichtenberg_core::{CellGrid, GrowthError, Point};

/// Default floor for [`Manual`] weights.
pub const DEFAULT_MIN_GUARANTEE: f64 = 0.05;

/// Weights read from a `height x width` array of probabilities.
///
/// Each probability `p` in `[0, 1]` becomes the weight
/// `p * (1 - min_guarantee) + min_guarantee`, so a 0 in the map still
/// leaves a small chance of growth.
#[derive(Debug, Clone)]
pub struct Manual {
    width: i32,
    height: i32,
    weights: Vec<f64>,
}

impl Manual {
    /// Build from rows of probabilities with the default floor.
    pub fn new(width: i32, height: i32, probabilities: &[Vec<f64>]) -> Result<Self, GrowthError> {
        Self::with_min_guarantee(width, height, probabilities, DEFAULT_MIN_GUARANTEE)
    }

    /// Build from rows of probabilities with an explicit floor.
    ///
    /// Fails with `ShapeMismatch` if there are not exactly `height` rows of
    /// exactly `width` values, and with `InvalidParameter` for values
    /// outside `[0, 1]`.
    pub fn with_min_guarantee(
        width: i32,
        height: i32,
        probabilities: &[Vec<f64>],
        min_guarantee: f64,
    ) -> Result<Self, GrowthError> {
        model::check_size(width, height)?;
        model::check_min_guarantee(min_guarantee)?;
        if probabilities.len() != height as usize {
            return Err(GrowthError::ShapeMismatch {
                expected: format!("{height} rows"),
                found: format!("{} rows", probabilities.len()),
            });
        }
        if let Some((y, row)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width as usize)
        {
            return Err(GrowthError::ShapeMismatch {
                expected: format!("{width} columns in row {y}"),
                found: format!("{} columns", row.len()),
            });
        }

        let range = 1.0 - min_guarantee;
        let mut weights = Vec::with_capacity(width as usize * height as usize);
        for row in probabilities {
            for &p in row {
                if !(0.0..=1.0).contains(&p) {
                    return Err(GrowthError::InvalidParameter {
                        name: "probabilities",
                        reason: format!("values must be in [0, 1], got {p}"),
                    });
                }
                weights.push(p * range + min_guarantee);
            }
        }
        Ok(Self {
            width,
            height,
            weights,
        })
    }
}

impl GrowthModel for Manual {
    fn name(&self) -> &str {
        "manual"
    }

    fn dimensions(&self) -> Option<(i32, i32)> {
        Some((self.width, self.height))
    }

    fn weight_at(&self, _grid: &CellGrid, p: Point) -> f64 {
        model::index(self.width, self.height, p)
            .map(|i| self.weights[i])
            .unwrap_or(0.0)
    }
}
