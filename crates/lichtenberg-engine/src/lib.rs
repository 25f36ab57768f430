//! Growth loop for Lichtenberg-figure simulations.
//!
//! [`Simulator`] ties a [`CellGrid`](lichtenberg_core::CellGrid), a lattice
//! and a [`GrowthModel`](lichtenberg_models::GrowthModel) together and
//! runs the step-wise growth loop. [`SimulatorConfig`] carries the
//! validated construction parameters, [`Hooks`] lets callers stop a run
//! early, and every run returns a [`SimulationReport`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
mod frontier;
pub mod hooks;
pub mod report;
pub mod simulator;

pub use config::{ParentPolicy, SimulatorConfig, MAX_LOOP};
pub use hooks::{BreakHook, Hooks, LoopHook};
pub use report::{SimulationReport, Termination};
pub use simulator::{SimState, Simulator};
