//! Fast dielectric breakdown (Kim, Sewall, Sud and Lin, "Fast Simulation
//! of Laplacian Growth").
//!
//! Instead of solving Laplace's equation, every broken cell is treated as
//! a point charge and a candidate's potential is the superposition
//! `Σ (1 - R1 / d)` over all charges. Potentials are kept per candidate
//! and updated incrementally: a candidate seen for the first time sums
//! over every charge, an existing candidate only adds the charges that
//! appeared since the previous loop.
//!
//! Constructed via the builder pattern: [`FastDielectric::builder`].

use crate::bias::Bias;
use crate::context::GrowthContext;
use crate::model::{self, GrowthModel};
use lichtenberg_core::{CellGrid, GrowthError, Point};
use log::trace;

/// Radius of a point charge.
pub const CHARGE_RADIUS: f64 = 0.5;

fn charge_potential(candidate: Point, charge: Point) -> f64 {
    1.0 - CHARGE_RADIUS / candidate.distance(charge)
}

/// Weights from incremental point-charge potentials.
#[derive(Debug, Clone)]
pub struct FastDielectric {
    width: i32,
    height: i32,
    eta: f64,
    min_guarantee: f64,
    bias: Option<Bias>,
    potential: Vec<f64>,
    initialised: Vec<bool>,
    charged: Vec<bool>,
    charges: Vec<Point>,
    primed: bool,
    min_potential: f64,
    span: f64,
}

/// Builder for [`FastDielectric`].
///
/// Defaults: eta 1.0, min_guarantee 0.0, no bias.
#[derive(Debug, Clone)]
pub struct FastDielectricBuilder {
    width: i32,
    height: i32,
    eta: f64,
    min_guarantee: f64,
    bias: Option<Bias>,
}

impl FastDielectric {
    /// Create a builder for a `width x height` grid.
    pub fn builder(width: i32, height: i32) -> FastDielectricBuilder {
        FastDielectricBuilder {
            width,
            height,
            eta: 1.0,
            min_guarantee: 0.0,
            bias: None,
        }
    }

    /// Number of point charges absorbed so far.
    pub fn charge_count(&self) -> usize {
        self.charges.len()
    }

    /// Normalised potential of `p` against the current frontier range.
    fn normalised(&self, i: usize) -> f64 {
        (self.potential[i] - self.min_potential) / self.span
    }

    fn absorb(&mut self, p: Point, fresh: &mut Vec<Point>) {
        if let Some(i) = model::index(self.width, self.height, p) {
            if !self.charged[i] {
                self.charged[i] = true;
                self.charges.push(p);
                fresh.push(p);
            }
        }
    }
}

impl FastDielectricBuilder {
    /// Branch sharpness exponent. Must be finite and `>= 0`.
    pub fn eta(mut self, eta: f64) -> Self {
        self.eta = eta;
        self
    }

    /// Weight floor in `[0, 1]`.
    pub fn min_guarantee(mut self, min_guarantee: f64) -> Self {
        self.min_guarantee = min_guarantee;
        self
    }

    /// Multiply every weight by a directional [`Bias`].
    pub fn bias(mut self, bias: Bias) -> Self {
        self.bias = Some(bias);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<FastDielectric, GrowthError> {
        model::check_size(self.width, self.height)?;
        if !self.eta.is_finite() || self.eta < 0.0 {
            return Err(GrowthError::InvalidParameter {
                name: "eta",
                reason: format!("must be finite and >= 0, got {}", self.eta),
            });
        }
        model::check_min_guarantee(self.min_guarantee)?;
        if let Some(bias) = &self.bias {
            let (bw, bh) = bias.dimensions();
            if (bw, bh) != (self.width, self.height) {
                return Err(GrowthError::ShapeMismatch {
                    expected: format!("{}x{} bias", self.width, self.height),
                    found: format!("{bw}x{bh} bias"),
                });
            }
        }

        let len = self.width as usize * self.height as usize;
        Ok(FastDielectric {
            width: self.width,
            height: self.height,
            eta: self.eta,
            min_guarantee: self.min_guarantee,
            bias: self.bias,
            potential: vec![0.0; len],
            initialised: vec![false; len],
            charged: vec![false; len],
            charges: Vec::new(),
            primed: false,
            min_potential: 0.0,
            span: 1.0,
        })
    }
}

impl GrowthModel for FastDielectric {
    fn name(&self) -> &str {
        "fast_dielectric"
    }

    fn dimensions(&self) -> Option<(i32, i32)> {
        Some((self.width, self.height))
    }

    fn prepare(&mut self, ctx: &mut GrowthContext<'_>) -> Result<(), GrowthError> {
        let mut fresh = Vec::new();
        if !self.primed {
            for p in ctx.grid().broken_points() {
                self.absorb(p, &mut fresh);
            }
            self.primed = true;
        }
        for &p in ctx.fresh() {
            self.absorb(p, &mut fresh);
        }

        let mut min_p = f64::INFINITY;
        let mut max_p = f64::NEG_INFINITY;
        for &c in ctx.frontier() {
            let Some(i) = model::index(self.width, self.height, c) else {
                continue;
            };
            if self.initialised[i] {
                for &q in &fresh {
                    self.potential[i] += charge_potential(c, q);
                }
            } else {
                self.potential[i] = self.charges.iter().map(|&q| charge_potential(c, q)).sum();
                self.initialised[i] = true;
            }
            min_p = min_p.min(self.potential[i]);
            max_p = max_p.max(self.potential[i]);
        }

        if max_p > min_p {
            self.min_potential = min_p;
            self.span = max_p - min_p;
        } else {
            self.min_potential = 0.0;
            self.span = 1.0;
        }
        trace!(
            "fast dielectric: {} new charges, frontier range [{min_p}, {max_p}]",
            fresh.len()
        );
        Ok(())
    }

    fn weight_at(&self, _grid: &CellGrid, p: Point) -> f64 {
        let Some(i) = model::index(self.width, self.height, p) else {
            return 0.0;
        };
        if !self.initialised[i] {
            return self.min_guarantee;
        }
        let t = self.normalised(i).max(0.0);
        let bias = self.bias.as_ref().map_or(1.0, |b| b.factor(p));
        (t.powf(self.eta) * bias).max(self.min_guarantee)
    }

    fn potential_at(&self, p: Point) -> Option<f64> {
        let i = model::index(self.width, self.height, p)?;
        self.initialised[i].then(|| self.potential[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bias::BiasDirection;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn frontier_of(grid: &CellGrid) -> Vec<Point> {
        let mut out = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.get_broken(x, y).unwrap() {
                    continue;
                }
                let touches = [(0, -1), (0, 1), (-1, 0), (1, 0)]
                    .iter()
                    .any(|&(dx, dy)| grid.get_broken(x + dx, y + dy).unwrap_or(false));
                if touches {
                    out.push(Point::new(x, y));
                }
            }
        }
        out
    }

    fn step(model: &mut FastDielectric, grid: &CellGrid, fresh: &[Point]) -> Vec<Point> {
        let frontier = frontier_of(grid);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = GrowthContext::new(grid, &frontier, fresh, &mut rng);
        model.prepare(&mut ctx).unwrap();
        frontier
    }

    #[test]
    fn single_seed_gives_flat_weights() {
        let mut m = FastDielectric::builder(5, 5).build().unwrap();
        let mut grid = CellGrid::new(5, 5).unwrap();
        grid.mark_broken(2, 2, None, 0).unwrap();
        let frontier = step(&mut m, &grid, &[Point::new(2, 2)]);
        assert_eq!(frontier.len(), 4);
        for p in frontier {
            assert_eq!(m.potential_at(p), Some(0.5));
            assert_eq!(m.weight_at(&grid, p), 0.5);
        }
    }

    #[test]
    fn incremental_update_matches_full_sum() {
        let mut m = FastDielectric::builder(9, 9).eta(2.0).build().unwrap();
        let mut grid = CellGrid::new(9, 9).unwrap();
        grid.mark_broken(4, 4, None, 0).unwrap();
        step(&mut m, &grid, &[Point::new(4, 4)]);

        let path = [(4, 5, 1), (4, 6, 2), (5, 6, 3), (6, 6, 4)];
        let mut parent = Point::new(4, 4);
        for (x, y, count) in path {
            grid.mark_broken(x, y, Some(parent), count).unwrap();
            parent = Point::new(x, y);
            step(&mut m, &grid, &[parent]);
        }

        let charges: Vec<Point> = grid.broken_points().collect();
        for c in frontier_of(&grid) {
            let expected: f64 = charges.iter().map(|&q| charge_potential(c, q)).sum();
            let got = m.potential_at(c).unwrap();
            assert!((got - expected).abs() < 1e-9, "{c}: {got} vs {expected}");
        }
        assert_eq!(m.charge_count(), 5);
    }

    #[test]
    fn normalised_weights_span_zero_to_one() {
        let mut m = FastDielectric::builder(7, 7).build().unwrap();
        let mut grid = CellGrid::new(7, 7).unwrap();
        grid.mark_broken(3, 3, None, 0).unwrap();
        grid.mark_broken(3, 4, Some(Point::new(3, 3)), 1).unwrap();
        let frontier = step(&mut m, &grid, &[Point::new(3, 3), Point::new(3, 4)]);
        let weights: Vec<f64> = frontier.iter().map(|&p| m.weight_at(&grid, p)).collect();
        let max = weights.iter().cloned().fold(f64::MIN, f64::max);
        let min = weights.iter().cloned().fold(f64::MAX, f64::min);
        assert!((max - 1.0).abs() < 1e-12);
        assert!(min.abs() < 1e-12);
    }

    #[test]
    fn floor_applies_to_low_cells() {
        let mut m = FastDielectric::builder(7, 7)
            .min_guarantee(0.25)
            .build()
            .unwrap();
        let mut grid = CellGrid::new(7, 7).unwrap();
        grid.mark_broken(3, 3, None, 0).unwrap();
        grid.mark_broken(3, 4, Some(Point::new(3, 3)), 1).unwrap();
        let frontier = step(&mut m, &grid, &[Point::new(3, 3), Point::new(3, 4)]);
        for p in frontier {
            assert!(m.weight_at(&grid, p) >= 0.25);
        }
    }

    #[test]
    fn bias_scales_weights() {
        let bias = Bias::new(5, 5, BiasDirection::Right, 1.0).unwrap();
        let mut m = FastDielectric::builder(5, 5).bias(bias).build().unwrap();
        let mut grid = CellGrid::new(5, 5).unwrap();
        grid.mark_broken(2, 2, None, 0).unwrap();
        step(&mut m, &grid, &[Point::new(2, 2)]);
        let left = m.weight_at(&grid, Point::new(1, 2));
        let right = m.weight_at(&grid, Point::new(3, 2));
        assert!(right > left);
    }

    #[test]
    fn mismatched_bias_rejected() {
        let bias = Bias::new(4, 5, BiasDirection::Up, 1.0).unwrap();
        assert!(matches!(
            FastDielectric::builder(5, 5).bias(bias).build(),
            Err(GrowthError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn unseen_cell_has_no_potential() {
        let m = FastDielectric::builder(3, 3).build().unwrap();
        assert_eq!(m.potential_at(Point::new(1, 1)), None);
        assert_eq!(m.potential_at(Point::new(3, 1)), None);
    }
}
