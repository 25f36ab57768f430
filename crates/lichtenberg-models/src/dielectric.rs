//! Dielectric breakdown model (DBM).
//!
//! Growth follows a solved electric potential: broken cells are grounded
//! conductors at [`POTENTIAL_VOID`], an external electrode configuration
//! is supplied by the caller, and each loop a frontier cell's weight is
//! `potential ^ eta`. The field lives on a `(width + 2) x (height + 2)`
//! lattice whose outer ring holds the external boundary; grid cell
//! `(x, y)` maps to field node `(x + 1, y + 1)`.
//!
//! Constructed via the builder pattern: [`Dielectric::builder`].

use crate::context::GrowthContext;
use crate::field::{FieldCell, PotentialField, SolveStats, SolverConfig};
use crate::model::{self, GrowthModel};
use lichtenberg_core::{CellGrid, GrowthError, Point};
use log::{debug, warn};

/// Potential of a broken (conducting) cell.
pub const POTENTIAL_VOID: f64 = 0.0;
/// Potential of an attracting electrode.
pub const POTENTIAL_ATTRACT: f64 = 1.0;

/// Weights from a full Laplace solve of the potential field.
///
/// The field is re-solved, warm-started, whenever new broken cells have
/// been locked since the previous loop. Insulated cells do not alter the
/// field.
///
/// Interior nodes the caller supplies as locked are electrodes: they hold
/// their potential and always weigh 0, so growth never enters them.
#[derive(Debug, Clone)]
pub struct Dielectric {
    width: i32,
    height: i32,
    field: PotentialField,
    electrodes: Vec<bool>,
    eta: f64,
    min_guarantee: f64,
    primed: bool,
    last_solve: Option<SolveStats>,
}

/// Builder for [`Dielectric`].
///
/// Required: the grid size and the initial padded field. Defaults:
/// eta 1.0, min_guarantee 0.0, [`SolverConfig::default`].
#[derive(Debug, Clone)]
pub struct DielectricBuilder {
    width: i32,
    height: i32,
    initial: Vec<Vec<FieldCell>>,
    eta: f64,
    min_guarantee: f64,
    solver: SolverConfig,
}

impl Dielectric {
    /// Create a builder for a `width x height` grid.
    ///
    /// `initial` must have `height + 2` rows of `width + 2` nodes.
    pub fn builder(width: i32, height: i32, initial: Vec<Vec<FieldCell>>) -> DielectricBuilder {
        DielectricBuilder {
            width,
            height,
            initial,
            eta: 1.0,
            min_guarantee: 0.0,
            solver: SolverConfig::default(),
        }
    }

    /// The common setup: the outer ring is an attracting electrode and
    /// the interior starts free at [`POTENTIAL_VOID`].
    pub fn uniform_attractor(width: i32, height: i32) -> Vec<Vec<FieldCell>> {
        let cols = (width.max(0) + 2) as usize;
        let rows = (height.max(0) + 2) as usize;
        (0..rows)
            .map(|y| {
                (0..cols)
                    .map(|x| {
                        if x == 0 || y == 0 || x == cols - 1 || y == rows - 1 {
                            FieldCell::locked(POTENTIAL_ATTRACT)
                        } else {
                            FieldCell::free(POTENTIAL_VOID)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// The padded potential field.
    pub fn field(&self) -> &PotentialField {
        &self.field
    }

    /// Statistics of the most recent solve.
    pub fn last_solve(&self) -> Option<SolveStats> {
        self.last_solve
    }

    fn ground(&mut self, p: Point) -> Result<bool, GrowthError> {
        self.field.lock(p.x + 1, p.y + 1, POTENTIAL_VOID)
    }
}

impl DielectricBuilder {
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

    /// Relaxation parameters.
    pub fn solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Dielectric, GrowthError> {
        model::check_size(self.width, self.height)?;
        if !self.eta.is_finite() || self.eta < 0.0 {
            return Err(GrowthError::InvalidParameter {
                name: "eta",
                reason: format!("must be finite and >= 0, got {}", self.eta),
            });
        }
        model::check_min_guarantee(self.min_guarantee)?;

        let cols = self.width as usize + 2;
        let rows = self.height as usize + 2;
        if self.initial.len() != rows || self.initial.iter().any(|r| r.len() != cols) {
            let found_cols = self.initial.first().map_or(0, Vec::len);
            return Err(GrowthError::ShapeMismatch {
                expected: format!("{cols}x{rows} field (grid plus a one-cell ring)"),
                found: format!("{found_cols}x{} field", self.initial.len()),
            });
        }

        let mut field = PotentialField::from_rows(&self.initial)?.with_config(self.solver)?;
        // The ring is the external boundary and never relaxes.
        for y in 0..rows as i32 {
            for x in 0..cols as i32 {
                let on_ring = x == 0 || y == 0 || x == cols as i32 - 1 || y == rows as i32 - 1;
                if on_ring {
                    let v = field.potential(x, y).unwrap_or(POTENTIAL_VOID);
                    field.lock(x, y, v)?;
                }
            }
        }

        let electrodes: Vec<bool> = self.initial[1..rows - 1]
            .iter()
            .flat_map(|row| row[1..cols - 1].iter().map(|node| node.locked))
            .collect();

        Ok(Dielectric {
            width: self.width,
            height: self.height,
            field,
            electrodes,
            eta: self.eta,
            min_guarantee: self.min_guarantee,
            primed: false,
            last_solve: None,
        })
    }
}

impl GrowthModel for Dielectric {
    fn name(&self) -> &str {
        "dielectric"
    }

    fn dimensions(&self) -> Option<(i32, i32)> {
        Some((self.width, self.height))
    }

    fn prepare(&mut self, ctx: &mut GrowthContext<'_>) -> Result<(), GrowthError> {
        let mut changed = false;
        if !self.primed {
            let broken: Vec<Point> = ctx.grid().broken_points().collect();
            for p in broken {
                changed |= self.ground(p)?;
            }
            self.primed = true;
        }
        for &p in ctx.fresh() {
            changed |= self.ground(p)?;
        }

        if changed || self.last_solve.is_none() {
            let stats = self.field.solve();
            debug!(
                "dielectric re-solve: {} sweeps, residual {:.3e}",
                stats.iterations, stats.residual
            );
            if !stats.converged {
                warn!(
                    "dielectric field did not converge after {} sweeps (residual {:.3e})",
                    stats.iterations, stats.residual
                );
            }
            self.last_solve = Some(stats);
        }
        Ok(())
    }

    fn weight_at(&self, _grid: &CellGrid, p: Point) -> f64 {
        let Some(i) = model::index(self.width, self.height, p) else {
            return 0.0;
        };
        if self.electrodes[i] {
            return 0.0;
        }
        let Some(phi) = self.field.potential(p.x + 1, p.y + 1) else {
            return 0.0;
        };
        let w = if phi > 0.0 { phi.powf(self.eta) } else { 0.0 };
        w.max(self.min_guarantee)
    }

    fn potential_at(&self, p: Point) -> Option<f64> {
        model::index(self.width, self.height, p)?;
        self.field.potential(p.x + 1, p.y + 1)
    }
}
