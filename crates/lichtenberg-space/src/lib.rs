//! Lattice topology for Lichtenberg growth.
//!
//! This crate defines the [`Space`] trait, which tells the growth loop
//! which cells a broken cell may grow into, along with concrete lattice
//! backends and the shapes used to carve insulation into a grid.
//!
//! # Backends
//!
//! - [`Square4`]: 4-connected square lattice
//! - [`Square8`]: 8-connected square lattice
//!
//! Both honour per-direction [`Directions`] enables and absorb at the grid
//! edge. [`Connectivity`] picks a backend from configuration.
//!
//! # Regions
//!
//! Insulation shapes are expressed as [`RegionSpec`] values and compiled
//! to a clipped [`RegionPlan`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod connectivity;
pub mod directions;
mod grid2d;
pub mod region;
pub mod space;
pub mod square4;
pub mod square8;

#[cfg(test)]
pub(crate) mod compliance;

pub use connectivity::Connectivity;
pub use directions::Directions;
pub use region::{RegionPlan, RegionSpec};
pub use space::Space;
pub use square4::Square4;
pub use square8::Square8;
