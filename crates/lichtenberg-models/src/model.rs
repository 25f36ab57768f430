//! The [`GrowthModel`] trait.

use crate::context::GrowthContext;
use lichtenberg_core::{CellGrid, GrowthError, Point};
use std::fmt;

/// Decides how likely each frontier cell is to break next.
///
/// # Contract
///
/// Each loop the simulator calls [`prepare`](Self::prepare) once, then
/// [`weight_at`](Self::weight_at) for every frontier cell, draws a winner
/// proportionally to the weights, breaks it, and reports it through
/// [`on_break`](Self::on_break).
///
/// - Weights must be finite and `>= 0`. The simulator treats anything
///   else as 0.
/// - A loop where every weight is 0 is a stall: nothing breaks, and the
///   loop counter still advances.
/// - Models must be deterministic given the grid, the call sequence, and
///   the RNG in the context.
///
/// # Object safety
///
/// This trait is object-safe; the simulator stores its model as
/// `Box<dyn GrowthModel>`.
///
/// # Examples
///
/// A model that only lets the structure grow downward:
///
/// ```
/// use lichtenberg_core::{CellGrid, Point};
/// use lichtenberg_models::GrowthModel;
///
/// #[derive(Debug)]
/// struct Gravity;
///
/// impl GrowthModel for Gravity {
///     fn name(&self) -> &str { "gravity" }
///
///     fn weight_at(&self, grid: &CellGrid, p: Point) -> f64 {
///         let above = grid.get_broken(p.x, p.y - 1).unwrap_or(false);
///         if above { 1.0 } else { 0.0 }
///     }
/// }
///
/// let grid = CellGrid::new(3, 3).unwrap();
/// assert_eq!(Gravity.weight_at(&grid, Point::new(1, 1)), 0.0);
/// ```
pub trait GrowthModel: Send + fmt::Debug {
    /// Human-readable model name, used in logs.
    fn name(&self) -> &str;

    /// Grid size the model was built for, if it carries per-cell state.
    ///
    /// The simulator rejects a model whose dimensions differ from its grid.
    fn dimensions(&self) -> Option<(i32, i32)> {
        None
    }

    /// Update internal state before weights are read for this loop.
    fn prepare(&mut self, ctx: &mut GrowthContext<'_>) -> Result<(), GrowthError> {
        let _ = ctx;
        Ok(())
    }

    /// Growth weight for the frontier cell `p`.
    fn weight_at(&self, grid: &CellGrid, p: Point) -> f64;

    /// Field potential at `p`, for models driven by one.
    fn potential_at(&self, p: Point) -> Option<f64> {
        let _ = p;
        None
    }

    /// Called after `p` has been broken.
    fn on_break(&mut self, p: Point) {
        let _ = p;
    }

    /// `true` once the model can never produce a positive weight again.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Check `min_guarantee` lies in `[0, 1]`.
pub(crate) fn check_min_guarantee(value: f64) -> Result<(), GrowthError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GrowthError::InvalidParameter {
            name: "min_guarantee",
            reason: format!("must be in [0, 1], got {value}"),
        });
    }
    Ok(())
}

/// Check a model's grid size.
pub(crate) fn check_size(width: i32, height: i32) -> Result<(), GrowthError> {
    if width <= 0 || height <= 0 {
        return Err(GrowthError::InvalidSize { width, height });
    }
    Ok(())
}

/// Row-major index of `p` in a `width x height` model, if inside.
#[inline]
pub(crate) fn index(width: i32, height: i32, p: Point) -> Option<usize> {
    if p.x >= 0 && p.x < width && p.y >= 0 && p.y < height {
        Some(p.y as usize * width as usize + p.x as usize)
    } else {
        None
    }
}
