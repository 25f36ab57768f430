//! Error types shared by every Lichtenberg crate.
//!
//! All variants are deterministic consequences of caller input. Nothing in
//! the engine retries; the caller corrects the request and tries again.

use std::error::Error;
use std::fmt;

use crate::grid::MAX_CELLS;
use crate::point::Point;

/// Errors raised by grid, model, simulator, and tree operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrowthError {
    /// A grid or model dimension is non-positive or too large.
    InvalidSize {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// A coordinate lies outside `[0, width) x [0, height)`.
    OutOfBounds {
        /// Offending column.
        x: i32,
        /// Offending row.
        y: i32,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },
    /// A caller-supplied array does not match the grid shape.
    ShapeMismatch {
        /// Human-readable expected shape.
        expected: String,
        /// Human-readable shape that was supplied.
        found: String,
    },
    /// `simulate` was called before any cell was broken.
    NoSeed,
    /// A seed cell is also insulated.
    InvalidSeed {
        /// Column of the offending seed.
        x: i32,
        /// Row of the offending seed.
        y: i32,
    },
    /// A mutation would rewrite growth history or break a grid invariant.
    InvalidTransition {
        /// Column of the target cell.
        x: i32,
        /// Row of the target cell.
        y: i32,
        /// What was wrong with the request.
        reason: String,
    },
    /// Two cells are not connected through the growth forest.
    NoPath {
        /// Start of the requested path.
        from: Point,
        /// End of the requested path.
        to: Point,
    },
    /// A model or solver parameter is outside its valid domain.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl GrowthError {
    /// Shorthand for an [`OutOfBounds`](Self::OutOfBounds) error at `p`.
    pub fn out_of_bounds(p: Point, width: i32, height: i32) -> Self {
        Self::OutOfBounds {
            x: p.x,
            y: p.y,
            width,
            height,
        }
    }

    /// Shorthand for an [`InvalidTransition`](Self::InvalidTransition) at `p`.
    pub fn transition(p: Point, reason: impl Into<String>) -> Self {
        Self::InvalidTransition {
            x: p.x,
            y: p.y,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GrowthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(
                    f,
                    "invalid size {width}x{height}: dimensions must be positive \
                     and cover at most {MAX_CELLS} cells"
                )
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "coordinate ({x}, {y}) is outside [0, {width}) x [0, {height})"
            ),
            Self::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {expected}, found {found}")
            }
            Self::NoSeed => write!(f, "no seed cell has been broken"),
            Self::InvalidSeed { x, y } => write!(f, "seed cell ({x}, {y}) is insulated"),
            Self::InvalidTransition { x, y, reason } => {
                write!(f, "invalid transition at ({x}, {y}): {reason}")
            }
            Self::NoPath { from, to } => write!(f, "no path between {from} and {to}"),
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
        }
    }
}

impl Error for GrowthError {}
