//! Benchmark profiles for the Lichtenberg growth engine.
//!
//! Provides pre-seeded [`Simulator`] profiles:
//!
//! - [`reference_profile`]: 128x128 grid with the incremental dielectric model
//! - [`stress_profile`]: 512x512 grid (~262K cells) with uniform weights
//! - [`solver_profile`]: 64x64 grid with the Laplace-solved dielectric model

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lichtenberg_engine::{Simulator, SimulatorConfig};
use lichtenberg_models::{Dielectric, FastDielectric, GrowthModel};

fn seeded(width: i32, height: i32, seed: u64, model: Box<dyn GrowthModel>) -> Simulator {
    let config = SimulatorConfig {
        seed,
        ..SimulatorConfig::with_size(width, height)
    };
    let mut sim = Simulator::from_config(config, Some(model)).unwrap();
    sim.breakdown(width / 2, 0).unwrap();
    sim
}

/// Reference profile: 128x128 grid, one seed on the top edge.
///
/// Model: `FastDielectric` with eta = 2, no bias.
pub fn reference_profile(seed: u64) -> Simulator {
    let model = FastDielectric::builder(128, 128).eta(2.0).build().unwrap();
    seeded(128, 128, seed, Box::new(model))
}

/// Stress profile: 512x512 grid with the default uniform model and an
/// insulated disk in the middle of the growth path.
pub fn stress_profile(seed: u64) -> Simulator {
    let config = SimulatorConfig {
        seed,
        ..SimulatorConfig::with_size(512, 512)
    };
    let mut sim = Simulator::from_config(config, None).unwrap();
    sim.breakdown(256, 0).unwrap();
    sim.insulate_circle(256, 256, 64, true).unwrap();
    sim
}

/// Solver profile: 64x64 `Dielectric` with the attractor ring at 1.
///
/// Every loop re-solves the Laplace field.
pub fn solver_profile(seed: u64) -> Simulator {
    let model = Dielectric::builder(64, 64, Dielectric::uniform_attractor(64, 64))
        .build()
        .unwrap();
    seeded(64, 64, seed, Box::new(model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lichtenberg_engine::{Hooks, SimState};

    #[test]
    fn profiles_are_seeded_and_ready() {
        for sim in [reference_profile(1), stress_profile(1), solver_profile(1)] {
            assert_eq!(sim.state(), SimState::Seeded);
            assert_eq!(sim.grid().roots().count(), 1);
        }
    }

    #[test]
    fn reference_profile_grows() {
        let mut sim = reference_profile(3);
        let report = sim.simulate(50, Hooks::new()).unwrap();
        assert_eq!(report.loops, 50);
        assert!(report.breaks > 0);
    }
}
