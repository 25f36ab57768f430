//! Growth weighted by a coherent noise field.
//!
//! Constructed via the builder pattern: [`ValueNoise::builder`].

use crate::model::{self, GrowthModel};
use crate::noise::value_noise;
use lichtenberg_core::{CellGrid, GrowthError, Point};

/// Weights from a precomputed value-noise map.
///
/// For each cell the noise `f` is sampled at `(x / scale, y / scale)` and
/// mapped to `(f + 1) / 2 * (1 - min_guarantee) + min_guarantee`, then
/// clamped to `[min_guarantee, 1]`. Larger `scale` gives broader blobs.
#[derive(Debug, Clone)]
pub struct ValueNoise {
    width: i32,
    height: i32,
    map: Vec<f64>,
}

/// Builder for [`ValueNoise`].
///
/// Defaults: seed 0, scale 10.0, persistence 0.5, octaves 5,
/// min_guarantee 0.05.
#[derive(Debug, Clone)]
pub struct ValueNoiseBuilder {
    width: i32,
    height: i32,
    seed: i32,
    scale: f64,
    persistence: f64,
    octaves: u32,
    min_guarantee: f64,
}

impl ValueNoise {
    /// Create a builder for a `width x height` noise model.
    pub fn builder(width: i32, height: i32) -> ValueNoiseBuilder {
        ValueNoiseBuilder {
            width,
            height,
            seed: 0,
            scale: 10.0,
            persistence: 0.5,
            octaves: 5,
            min_guarantee: 0.05,
        }
    }

    /// The mapped weight at `p`, or `None` off the map.
    pub fn value(&self, p: Point) -> Option<f64> {
        model::index(self.width, self.height, p).map(|i| self.map[i])
    }
}

impl ValueNoiseBuilder {
    /// Noise seed. Different seeds give unrelated fields.
    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Feature size in cells. Must be finite and `> 0`.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Amplitude falloff per octave. Must be finite and `>= 0`.
    pub fn persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Number of octaves. Must be `>= 1`.
    pub fn octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Weight floor in `[0, 1]`.
    pub fn min_guarantee(mut self, min_guarantee: f64) -> Self {
        self.min_guarantee = min_guarantee;
        self
    }

    /// Validate parameters and precompute the weight map.
    pub fn build(self) -> Result<ValueNoise, GrowthError> {
        model::check_size(self.width, self.height)?;
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(GrowthError::InvalidParameter {
                name: "scale",
                reason: format!("must be finite and > 0, got {}", self.scale),
            });
        }
        if !self.persistence.is_finite() || self.persistence < 0.0 {
            return Err(GrowthError::InvalidParameter {
                name: "persistence",
                reason: format!("must be finite and >= 0, got {}", self.persistence),
            });
        }
        if self.octaves == 0 {
            return Err(GrowthError::InvalidParameter {
                name: "octaves",
                reason: "must be >= 1".to_string(),
            });
        }
        model::check_min_guarantee(self.min_guarantee)?;

        let floor = self.min_guarantee;
        let range = 1.0 - floor;
        let mut map = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let f = value_noise(
                    f64::from(x) / self.scale,
                    f64::from(y) / self.scale,
                    self.persistence,
                    self.octaves,
                    self.seed,
                );
                let n = (f + 1.0) / 2.0;
                map.push((n * range + floor).clamp(floor, 1.0));
            }
        }
        Ok(ValueNoise {
            width: self.width,
            height: self.height,
            map,
        })
    }
}

impl GrowthModel for ValueNoise {
    fn name(&self) -> &str {
        "value_noise"
    }

    fn dimensions(&self) -> Option<(i32, i32)> {
        Some((self.width, self.height))
    }

    fn weight_at(&self, _grid: &CellGrid, p: Point) -> f64 {
        self.value(p).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_size() {
        for (w, h) in [(0, 5), (5, 0), (-1, 3), (3, -2)] {
            assert!(matches!(
                ValueNoise::builder(w, h).build(),
                Err(GrowthError::InvalidSize { .. })
            ));
        }
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(ValueNoise::builder(4, 4).scale(0.0).build().is_err());
        assert!(ValueNoise::builder(4, 4).scale(f64::NAN).build().is_err());
        assert!(ValueNoise::builder(4, 4).persistence(-0.1).build().is_err());
        assert!(ValueNoise::builder(4, 4).octaves(0).build().is_err());
        assert!(ValueNoise::builder(4, 4).min_guarantee(1.5).build().is_err());
    }

    #[test]
    fn weights_respect_floor_and_ceiling() {
        let m = ValueNoise::builder(32, 24)
            .min_guarantee(0.2)
            .octaves(6)
            .persistence(0.9)
            .build()
            .unwrap();
        let grid = CellGrid::new(32, 24).unwrap();
        for y in 0..24 {
            for x in 0..32 {
                let w = m.weight_at(&grid, Point::new(x, y));
                assert!((0.2..=1.0).contains(&w), "weight {w} at ({x}, {y})");
            }
        }
    }

    #[test]
    fn same_seed_same_map() {
        let a = ValueNoise::builder(16, 16).seed(7).build().unwrap();
        let b = ValueNoise::builder(16, 16).seed(7).build().unwrap();
        assert_eq!(a.map, b.map);
    }

    #[test]
    fn off_map_weight_is_zero() {
        let m = ValueNoise::builder(4, 4).build().unwrap();
        let grid = CellGrid::new(4, 4).unwrap();
        assert_eq!(m.weight_at(&grid, Point::new(4, 0)), 0.0);
        assert_eq!(m.dimensions(), Some((4, 4)));
    }
}
