//! Simulator configuration and validation.
//!
//! [`SimulatorConfig`] is the input for [`Simulator::from_config`](crate::Simulator::from_config).
//! [`validate()`](SimulatorConfig::validate) checks structural invariants
//! before any grid is allocated.

use lichtenberg_core::{GrowthError, MAX_CELLS};
use lichtenberg_space::{Connectivity, Directions};

/// Conventional loop cap for a full-size run.
pub const MAX_LOOP: u32 = 50_000;

// ── ParentPolicy ───────────────────────────────────────────────────

/// How a newly broken cell picks its parent when several broken
/// neighbours could have grown into it.
///
/// Candidates are considered in the lattice's offset order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParentPolicy {
    /// The neighbour with the smallest `count`; ties go to the first.
    #[default]
    ShortestPath,
    /// The first broken neighbour.
    FirstFound,
    /// A uniformly drawn broken neighbour, from the simulator's RNG.
    Random,
}

// ── SimulatorConfig ────────────────────────────────────────────────

/// Complete configuration for constructing a [`Simulator`](crate::Simulator).
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatorConfig {
    /// Grid width in cells. Must be `> 0`.
    pub width: i32,
    /// Grid height in cells. Must be `> 0`.
    pub height: i32,
    /// Seed for the simulator's `ChaCha8Rng`. Default: 0.
    pub seed: u64,
    /// Neighbourhood of the lattice. Default: 4-connected.
    pub connectivity: Connectivity,
    /// Per-direction growth enables. Default: all.
    pub directions: Directions,
    /// Parent selection rule. Default: [`ParentPolicy::ShortestPath`].
    pub parent_policy: ParentPolicy,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 0,
            connectivity: Connectivity::default(),
            directions: Directions::default(),
            parent_policy: ParentPolicy::default(),
        }
    }
}

impl SimulatorConfig {
    /// A default configuration of the given size.
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), GrowthError> {
        // 1. Both dimensions must be positive.
        if self.width <= 0 || self.height <= 0 {
            return Err(GrowthError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        // 2. Cell count is capped so every grid can be saved.
        let cells = (self.width as u64) * (self.height as u64);
        if cells > MAX_CELLS || usize::try_from(cells).is_err() {
            return Err(GrowthError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
