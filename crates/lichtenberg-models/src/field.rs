//! Iterative Laplace solver over locked and free nodes.
//!
//! [`PotentialField`] relaxes every free node toward the mean of its
//! in-bounds 4-neighbours while locked nodes hold their potential, using
//! successive over-relaxation with red-black ordering:
//!
//! ```text
//! for colour in [red, black]:
//!     for each free node i of that colour (in parallel):
//!         diff    = mean(prev[neighbours(i)]) - prev[i]
//!         next[i] = prev[i] + omega * diff
//!     swap(prev, next)
//! residual = sum(|diff|) over both half-sweeps
//! ```
//!
//! A node of one colour only reads nodes of the other colour, so each
//! half-sweep is data-parallel and the two half-sweeps are the only
//! synchronisation points. Residuals are gathered per row in row order
//! and summed sequentially, so the result is bit-identical whether the
//! sweep runs on one thread or many.

use lichtenberg_core::GrowthError;
use rayon::prelude::*;

/// One solver node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldCell {
    /// Current potential.
    pub potential: f64,
    /// Held fixed during relaxation.
    pub locked: bool,
}

impl FieldCell {
    /// A node free to relax, starting at `potential`.
    pub const fn free(potential: f64) -> Self {
        Self {
            potential,
            locked: false,
        }
    }

    /// A node held at `potential`.
    pub const fn locked(potential: f64) -> Self {
        Self {
            potential,
            locked: true,
        }
    }
}

/// Relaxation parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Over-relaxation factor in `(0, 2)`. Default: 1.9.
    pub omega: f64,
    /// Stop once the summed update of a full sweep drops below this.
    /// Default: 1e-3.
    pub tolerance: f64,
    /// Iteration cap. Default: 10 000.
    pub max_iterations: u32,
    /// Lattices with at least this many nodes sweep rows in parallel.
    /// Default: 16 384.
    pub parallel_threshold: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            omega: 1.9,
            tolerance: 1e-3,
            max_iterations: 10_000,
            parallel_threshold: 16_384,
        }
    }
}

impl SolverConfig {
    /// Check every parameter against its domain.
    pub fn validate(&self) -> Result<(), GrowthError> {
        // 1. SOR only converges for 0 < omega < 2.
        if !(self.omega > 0.0 && self.omega < 2.0) {
            return Err(GrowthError::InvalidParameter {
                name: "omega",
                reason: format!("must be in (0, 2), got {}", self.omega),
            });
        }
        // 2. Tolerance must be a positive finite number.
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(GrowthError::InvalidParameter {
                name: "tolerance",
                reason: format!("must be finite and > 0, got {}", self.tolerance),
            });
        }
        // 3. At least one sweep.
        if self.max_iterations == 0 {
            return Err(GrowthError::InvalidParameter {
                name: "max_iterations",
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Outcome of one [`PotentialField::solve`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveStats {
    /// Full sweeps performed.
    pub iterations: u32,
    /// Summed absolute update of the last sweep.
    pub residual: f64,
    /// Whether the residual dropped below the tolerance.
    pub converged: bool,
}

/// A `cols x rows` lattice of potentials with locked boundary nodes.
#[derive(Clone, Debug)]
pub struct PotentialField {
    cols: usize,
    rows: usize,
    potential: Vec<f64>,
    scratch: Vec<f64>,
    locked: Vec<bool>,
    config: SolverConfig,
}

impl PotentialField {
    /// Build from row-major nodes.
    pub fn new(cols: i32, rows: i32, cells: &[FieldCell]) -> Result<Self, GrowthError> {
        if cols <= 0 || rows <= 0 {
            return Err(GrowthError::InvalidSize {
                width: cols,
                height: rows,
            });
        }
        let len = cols as usize * rows as usize;
        if cells.len() != len {
            return Err(GrowthError::ShapeMismatch {
                expected: format!("{len} nodes ({cols}x{rows})"),
                found: format!("{} nodes", cells.len()),
            });
        }
        let potential: Vec<f64> = cells.iter().map(|c| c.potential).collect();
        Ok(Self {
            cols: cols as usize,
            rows: rows as usize,
            scratch: potential.clone(),
            potential,
            locked: cells.iter().map(|c| c.locked).collect(),
            config: SolverConfig::default(),
        })
    }

    /// Build from a list of equally long rows.
    pub fn from_rows(rows: &[Vec<FieldCell>]) -> Result<Self, GrowthError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GrowthError::ShapeMismatch {
                expected: format!("{cols} nodes in row {y}"),
                found: format!("{} nodes", row.len()),
            });
        }
        let flat: Vec<FieldCell> = rows.iter().flatten().copied().collect();
        Self::new(
            i32::try_from(cols).unwrap_or(i32::MAX),
            i32::try_from(rows.len()).unwrap_or(i32::MAX),
            &flat,
        )
    }

    /// Replace the relaxation parameters.
    pub fn with_config(mut self, config: SolverConfig) -> Result<Self, GrowthError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Relaxation parameters in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// All potentials, row-major.
    pub fn potentials(&self) -> &[f64] {
        &self.potential
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    /// Potential at `(col, row)`.
    pub fn potential(&self, col: i32, row: i32) -> Option<f64> {
        self.index(col, row).map(|i| self.potential[i])
    }

    /// Whether `(col, row)` is held fixed.
    pub fn is_locked(&self, col: i32, row: i32) -> Option<bool> {
        self.index(col, row).map(|i| self.locked[i])
    }

    /// Hold `(col, row)` at `potential`. Returns `true` if anything changed.
    pub fn lock(&mut self, col: i32, row: i32, potential: f64) -> Result<bool, GrowthError> {
        let i = self.index(col, row).ok_or(GrowthError::OutOfBounds {
            x: col,
            y: row,
            width: self.cols as i32,
            height: self.rows as i32,
        })?;
        let changed = !self.locked[i] || self.potential[i] != potential;
        self.locked[i] = true;
        self.potential[i] = potential;
        Ok(changed)
    }

    /// Relax until converged or the iteration cap is hit.
    ///
    /// Warm-starts from the current potentials, so re-solving after a few
    /// new locks is much cheaper than the first solve.
    pub fn solve(&mut self) -> SolveStats {
        let mut residual = f64::INFINITY;
        for iteration in 1..=self.config.max_iterations {
            residual = self.half_sweep(0) + self.half_sweep(1);
            if residual < self.config.tolerance {
                return SolveStats {
                    iterations: iteration,
                    residual,
                    converged: true,
                };
            }
        }
        SolveStats {
            iterations: self.config.max_iterations,
            residual,
            converged: false,
        }
    }

    /// Update every free node with `(x + y) % 2 == colour`.
    fn half_sweep(&mut self, colour: usize) -> f64 {
        let cols = self.cols;
        let rows = self.rows;
        let omega = self.config.omega;
        let cur = &self.potential;
        let locked = &self.locked;

        let relax_row = |(y, out): (usize, &mut [f64])| -> f64 {
            let base = y * cols;
            let mut err = 0.0;
            for (x, slot) in out.iter_mut().enumerate() {
                let i = base + x;
                let old = cur[i];
                if (x + y) % 2 != colour || locked[i] {
                    *slot = old;
                    continue;
                }
                let mut sum = 0.0;
                let mut n = 0u32;
                if x > 0 {
                    sum += cur[i - 1];
                    n += 1;
                }
                if x + 1 < cols {
                    sum += cur[i + 1];
                    n += 1;
                }
                if y > 0 {
                    sum += cur[i - cols];
                    n += 1;
                }
                if y + 1 < rows {
                    sum += cur[i + cols];
                    n += 1;
                }
                if n == 0 {
                    *slot = old;
                    continue;
                }
                let diff = sum / f64::from(n) - old;
                *slot = old + omega * diff;
                err += diff.abs();
            }
            err
        };

        let row_errors: Vec<f64> = if cols * rows >= self.config.parallel_threshold {
            self.scratch
                .par_chunks_mut(cols)
                .enumerate()
                .map(relax_row)
                .collect()
        } else {
            self.scratch
                .chunks_mut(cols)
                .enumerate()
                .map(relax_row)
                .collect()
        };
        std::mem::swap(&mut self.potential, &mut self.scratch);
        row_errors.iter().sum()
    }
}
