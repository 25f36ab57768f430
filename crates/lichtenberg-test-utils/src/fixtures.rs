//! Reusable growth-model fixtures.
//!
//! - [`ConstModel`]: the same weight everywhere, including invalid ones.
//! - [`TargetModel`]: weight only on a fixed set of cells.
//! - [`RecordingModel`]: counts `prepare` calls and fresh cells.
//! - [`ExhaustAfter`]: reports exhaustion after N breaks.
//! - [`FailingModel`]: `prepare` fails deterministically after N calls.

use lichtenberg_core::{CellGrid, GrowthError, Point};
use lichtenberg_models::{GrowthContext, GrowthModel};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Returns `weight` for every cell.
///
/// Pass `f64::NAN` or a negative value to exercise weight sanitising.
#[derive(Debug, Clone, Copy)]
pub struct ConstModel(pub f64);

impl GrowthModel for ConstModel {
    fn name(&self) -> &str {
        "const"
    }

    fn weight_at(&self, _grid: &CellGrid, _p: Point) -> f64 {
        self.0
    }
}

/// Weight 1.0 on the listed cells, 0 elsewhere.
#[derive(Debug, Clone)]
pub struct TargetModel {
    pub targets: Vec<Point>,
}

impl TargetModel {
    pub fn new(targets: impl IntoIterator<Item = Point>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
        }
    }
}

impl GrowthModel for TargetModel {
    fn name(&self) -> &str {
        "target"
    }

    fn weight_at(&self, _grid: &CellGrid, p: Point) -> f64 {
        if self.targets.contains(&p) {
            1.0
        } else {
            0.0
        }
    }
}

/// Shared counters observed by a [`RecordingModel`].
#[derive(Debug, Default)]
pub struct Recording {
    pub prepares: AtomicUsize,
    pub fresh_total: AtomicUsize,
    pub breaks: AtomicUsize,
}

/// Uniform weights; records every `prepare` and `on_break` into a shared
/// [`Recording`].
///
/// Counters are atomics behind an `Arc` so the model stays `Send`.
#[derive(Debug, Clone)]
pub struct RecordingModel {
    pub recording: Arc<Recording>,
}

impl RecordingModel {
    pub fn new() -> (Self, Arc<Recording>) {
        let recording = Arc::new(Recording::default());
        (
            Self {
                recording: Arc::clone(&recording),
            },
            recording,
        )
    }
}

impl GrowthModel for RecordingModel {
    fn name(&self) -> &str {
        "recording"
    }

    fn prepare(&mut self, ctx: &mut GrowthContext<'_>) -> Result<(), GrowthError> {
        self.recording.prepares.fetch_add(1, Ordering::Relaxed);
        self.recording
            .fresh_total
            .fetch_add(ctx.fresh().len(), Ordering::Relaxed);
        Ok(())
    }

    fn weight_at(&self, _grid: &CellGrid, _p: Point) -> f64 {
        1.0
    }

    fn on_break(&mut self, _p: Point) {
        self.recording.breaks.fetch_add(1, Ordering::Relaxed);
    }
}

/// Uniform weights until `limit` cells have broken, then exhausted.
#[derive(Debug, Clone)]
pub struct ExhaustAfter {
    pub limit: usize,
    seen: usize,
}

impl ExhaustAfter {
    pub fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }
}

impl GrowthModel for ExhaustAfter {
    fn name(&self) -> &str {
        "exhaust_after"
    }

    fn weight_at(&self, _grid: &CellGrid, _p: Point) -> f64 {
        1.0
    }

    fn on_break(&mut self, _p: Point) {
        self.seen += 1;
    }

    fn is_exhausted(&self) -> bool {
        self.seen >= self.limit
    }
}

/// `prepare` succeeds `succeed_count` times, then fails with
/// `InvalidParameter`.
#[derive(Debug)]
pub struct FailingModel {
    succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingModel {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }
}

impl GrowthModel for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    fn prepare(&mut self, _ctx: &mut GrowthContext<'_>) -> Result<(), GrowthError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(GrowthError::InvalidParameter {
                name: "failing",
                reason: format!("prepare call {n} fails by construction"),
            });
        }
        Ok(())
    }

    fn weight_at(&self, _grid: &CellGrid, _p: Point) -> f64 {
        1.0
    }
}
