//! Test utilities and mock models for Lichtenberg development.
//!
//! Provides mock [`GrowthModel`](lichtenberg_models::GrowthModel)
//! implementations in [`fixtures`], a forest-invariant checker, and
//! helpers that grow small deterministic grids for downstream crates.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ConstModel, ExhaustAfter, FailingModel, Recording, RecordingModel, TargetModel};

use lichtenberg_core::CellGrid;
use lichtenberg_engine::{Hooks, Simulator, SimulatorConfig};

/// Panic unless every broken cell of `grid` satisfies the forest rules.
///
/// Checks parent adjacency and brokenness, the `count + 1` step, that no
/// grown cell is insulated, and that the cached `max_count` and
/// `broken_count` agree with a full scan.
pub fn assert_forest(grid: &CellGrid) {
    let mut max_count = 0;
    let mut broken = 0;
    for p in grid.broken_points() {
        let cell = grid.cell(p.x, p.y).unwrap();
        broken += 1;
        max_count = max_count.max(cell.count);
        match cell.parent {
            None => assert_eq!(cell.count, 0, "root {p} has count {}", cell.count),
            Some(parent) => {
                assert!(!cell.insulated, "grown cell {p} is insulated");
                assert_eq!(parent.chebyshev(p), 1, "{p} parent {parent} not adjacent");
                let pc = grid
                    .cell(parent.x, parent.y)
                    .unwrap_or_else(|e| panic!("{p} parent {parent} off grid: {e}"));
                assert!(pc.broken, "{p} parent {parent} not broken");
                assert_eq!(cell.count, pc.count + 1, "{p} count does not follow parent");
            }
        }
    }
    for (i, cell) in grid.cells().iter().enumerate() {
        if !cell.broken {
            assert_eq!(cell.count, 0, "free cell {} has count", grid.point_of(i));
            assert!(cell.parent.is_none(), "free cell {} has parent", grid.point_of(i));
        }
    }
    assert_eq!(grid.get_max_count(), max_count, "cached max_count is stale");
    assert_eq!(grid.broken_count(), broken, "cached broken_count is stale");
}

/// Grow `loops` cells from a single seed at the top centre of a
/// `width x height` grid with uniform weights.
pub fn grown_grid(width: i32, height: i32, seed: u64, loops: u32) -> CellGrid {
    let config = SimulatorConfig {
        width,
        height,
        seed,
        ..SimulatorConfig::default()
    };
    let mut sim = Simulator::from_config(config, None).unwrap();
    sim.breakdown(width / 2, 0).unwrap();
    sim.simulate(loops, Hooks::new()).unwrap();
    sim.into_grid()
}

/// Like [`grown_grid`] with two seeds, at the top-left and bottom-right
/// corners, so the result is a two-tree forest.
pub fn two_root_grid(width: i32, height: i32, seed: u64, loops: u32) -> CellGrid {
    let config = SimulatorConfig {
        width,
        height,
        seed,
        ..SimulatorConfig::default()
    };
    let mut sim = Simulator::from_config(config, None).unwrap();
    sim.breakdown(0, 0).unwrap();
    sim.breakdown(width - 1, height - 1).unwrap();
    sim.simulate(loops, Hooks::new()).unwrap();
    sim.into_grid()
}
