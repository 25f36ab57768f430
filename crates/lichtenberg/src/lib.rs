//! Lichtenberg: stochastic growth of branching discharge figures on 2D lattices.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Lichtenberg sub-crates. For most users, adding `lichtenberg` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lichtenberg::prelude::*;
//!
//! // A 64x64 grid driven by an incremental dielectric-breakdown field.
//! let model = FastDielectric::builder(64, 64).eta(2.0).build().unwrap();
//! let config = SimulatorConfig { seed: 42, ..SimulatorConfig::with_size(64, 64) };
//! let mut sim = Simulator::from_config(config, Some(Box::new(model))).unwrap();
//!
//! sim.breakdown(32, 0).unwrap();
//! sim.insulate_circle(32, 40, 6, true).unwrap();
//!
//! // Grow until a branch touches the bottom row.
//! let report = sim
//!     .simulate(MAX_LOOP, Hooks::new().on_break(|_x, y| y == 63))
//!     .unwrap();
//! assert!(report.breaks > 0);
//!
//! let tree = GrowthTree::build(sim.grid());
//! let deepest = tree.get_leaves().into_iter().max_by_key(|l| l.count()).unwrap();
//! let (x, y, _) = deepest.node().point();
//! let path = tree.get_path(32, 0, x, y).unwrap();
//! assert_eq!(path.len() as u32, deepest.count() + 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lichtenberg-core` | `Point`, `Cell`, `CellGrid`, `GrowthError` |
//! | [`space`] | `lichtenberg-space` | Lattices, direction enables, insulation regions |
//! | [`models`] | `lichtenberg-models` | Growth models and the potential solver |
//! | [`engine`] | `lichtenberg-engine` | The simulator and its growth loop |
//! | [`tree`] | `lichtenberg-tree` | Leaf and path queries over a grown grid |
//! | [`archive`] | `lichtenberg-archive` | Saving and loading grids |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid coordinates, cells, and errors (`lichtenberg-core`).
pub use lichtenberg_core as types;

/// Lattices and region rasterisation (`lichtenberg-space`).
///
/// Provides the [`space::Space`] trait with [`space::Square4`] and
/// [`space::Square8`], plus [`space::RegionSpec`] for insulation shapes.
pub use lichtenberg_space as space;

/// Growth models (`lichtenberg-models`).
///
/// [`models::GrowthModel`] is the main extension point. Built-in models
/// range from [`models::Uniform`] to the Laplace-solved
/// [`models::Dielectric`].
pub use lichtenberg_models as models;

/// The simulator (`lichtenberg-engine`).
pub use lichtenberg_engine as engine;

/// Tree queries (`lichtenberg-tree`).
pub use lichtenberg_tree as tree;

/// Grid persistence (`lichtenberg-archive`).
///
/// Save with [`archive::save`], load with [`archive::load`], or use the
/// [`archive::GridArchive`] methods on a grid.
pub use lichtenberg_archive as archive;

/// Common imports for typical Lichtenberg usage.
///
/// ```rust
/// use lichtenberg::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use lichtenberg_core::{Cell, CellGrid, GrowthError, Point};

    // Space
    pub use lichtenberg_space::{Connectivity, Directions, RegionSpec, Space};

    // Models
    pub use lichtenberg_models::{
        Bias, BiasDirection, Dielectric, Dla, FastDielectric, FieldCell, GrowthModel, Manual,
        Uniform, ValueNoise,
    };

    // Engine
    pub use lichtenberg_engine::{
        Hooks, ParentPolicy, SimState, SimulationReport, Simulator, SimulatorConfig,
        Termination, MAX_LOOP,
    };

    // Tree and archive
    pub use lichtenberg_archive::{ArchiveError, GridArchive};
    pub use lichtenberg_tree::GrowthTree;
}
