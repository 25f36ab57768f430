//! Outcome of a [`Simulator::simulate`](crate::Simulator::simulate) run.

use std::fmt;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// No free cell borders the structure.
    FrontierExhausted,
    /// The model reported it can never grow again.
    ModelExhausted,
    /// The per-break hook asked to stop.
    BreakHook,
    /// The per-loop hook asked to stop.
    LoopHook,
    /// `max_loop` iterations ran.
    LoopLimit,
}

impl Termination {
    /// `true` if a caller hook ended the run.
    pub fn is_hook(self) -> bool {
        matches!(self, Self::BreakHook | Self::LoopHook)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FrontierExhausted => "frontier exhausted",
            Self::ModelExhausted => "model exhausted",
            Self::BreakHook => "stopped by break hook",
            Self::LoopHook => "stopped by loop hook",
            Self::LoopLimit => "loop limit reached",
        };
        f.write_str(s)
    }
}

/// Counters collected over one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationReport {
    /// Loop iterations performed, stalls included.
    pub loops: u32,
    /// Cells broken.
    pub breaks: u32,
    /// Iterations where every weight was 0.
    pub stalls: u32,
    /// Why the run stopped.
    pub termination: Termination,
}
