//! Core types for Lichtenberg-figure growth simulations.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! grid every other crate reads and writes:
//!
//! - [`Point`]: signed `(x, y)` cell coordinate
//! - [`Cell`]: broken / insulated flags plus the branch `count` and `parent`
//! - [`CellGrid`]: the dense row-major grid and its forest invariants
//! - [`GrowthError`]: the error taxonomy shared across the workspace

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod grid;
pub mod point;

pub use cell::Cell;
pub use error::GrowthError;
pub use grid::{CellGrid, MAX_CELLS};
pub use point::Point;
