//! Directional multipliers for [`FastDielectric`](crate::FastDielectric).

use crate::model;
use lichtenberg_core::{GrowthError, Point};

/// Side of the grid that growth is pulled toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BiasDirection {
    /// Toward `x = 0`.
    Left,
    /// Toward `x = width`.
    Right,
    /// Toward `y = 0`.
    Up,
    /// Toward `y = height`.
    Down,
}

/// A per-cell weight multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct Bias {
    width: i32,
    height: i32,
    factors: Vec<f64>,
}

impl Bias {
    /// Linear ramp toward `direction`, growing from 1 to `1 + scale`.
    pub fn new(
        width: i32,
        height: i32,
        direction: BiasDirection,
        scale: f64,
    ) -> Result<Self, GrowthError> {
        model::check_size(width, height)?;
        if !scale.is_finite() || scale < 0.0 {
            return Err(GrowthError::InvalidParameter {
                name: "scale",
                reason: format!("must be finite and >= 0, got {scale}"),
            });
        }
        let (w, h) = (f64::from(width), f64::from(height));
        let mut factors = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let (fx, fy) = (f64::from(x) / w, f64::from(y) / h);
                let ramp = match direction {
                    BiasDirection::Right => fx,
                    BiasDirection::Left => 1.0 - fx,
                    BiasDirection::Down => fy,
                    BiasDirection::Up => 1.0 - fy,
                };
                factors.push(1.0 + ramp * scale);
            }
        }
        Ok(Self {
            width,
            height,
            factors,
        })
    }

    /// Caller-supplied row-major multipliers.
    ///
    /// Values must be finite and `>= 0`.
    pub fn from_values(width: i32, height: i32, values: Vec<f64>) -> Result<Self, GrowthError> {
        model::check_size(width, height)?;
        let len = width as usize * height as usize;
        if values.len() != len {
            return Err(GrowthError::ShapeMismatch {
                expected: format!("{len} multipliers ({width}x{height})"),
                found: format!("{} multipliers", values.len()),
            });
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(GrowthError::InvalidParameter {
                name: "bias",
                reason: format!("multipliers must be finite and >= 0, got {v}"),
            });
        }
        Ok(Self {
            width,
            height,
            factors: values,
        })
    }

    /// Grid size this bias covers.
    pub fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Multiplier at `p`; 1.0 off the grid.
    pub fn factor(&self, p: Point) -> f64 {
        model::index(self.width, self.height, p)
            .map(|i| self.factors[i])
            .unwrap_or(1.0)
    }
}
