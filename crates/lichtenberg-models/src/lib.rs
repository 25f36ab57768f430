//! Growth models for Lichtenberg simulations.
//!
//! A model assigns every frontier cell a non-negative weight; the
//! simulator then draws the next cell to break in proportion to those
//! weights. All models implement the object-safe [`GrowthModel`] trait.
//!
//! # Models
//!
//! - [`Uniform`]: equal weights
//! - [`ValueNoise`]: coherent noise map
//! - [`Manual`]: caller-supplied probabilities
//! - [`Dielectric`]: full Laplace solve of a potential field
//! - [`FastDielectric`]: incremental point-charge potentials, with an
//!   optional [`Bias`]
//! - [`Dla`]: random walkers that stick to the structure
//!
//! The [`field`] module holds the red-black SOR solver behind
//! [`Dielectric`]; it parallelises row updates with rayon and produces
//! identical results on any number of threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bias;
pub mod context;
pub mod dielectric;
pub mod dla;
pub mod fast_dielectric;
pub mod field;
pub mod manual;
pub mod model;
pub mod noise;
pub mod uniform;
pub mod value_noise;

pub use bias::{Bias, BiasDirection};
pub use context::GrowthContext;
pub use dielectric::{Dielectric, DielectricBuilder};
pub use dla::Dla;
pub use fast_dielectric::{FastDielectric, FastDielectricBuilder};
pub use field::{FieldCell, PotentialField, SolveStats, SolverConfig};
pub use manual::Manual;
pub use model::GrowthModel;
pub use uniform::Uniform;
pub use value_noise::{ValueNoise, ValueNoiseBuilder};
