//! Integration test: loop termination, hooks, and model contracts.
//!
//! Drives the simulator with the mock models from `lichtenberg-test-utils`
//! and checks every way a run can end, plus the bookkeeping a model sees
//! through `prepare` and `on_break`.

use std::cell::Cell as Counter;
use std::sync::atomic::Ordering;

use lichtenberg_core::{GrowthError, Point};
use lichtenberg_engine::{Hooks, SimState, Simulator, Termination};
use lichtenberg_models::{Dielectric, Dla, FieldCell};
use lichtenberg_space::Directions;
use lichtenberg_test_utils::{
    assert_forest, ConstModel, ExhaustAfter, FailingModel, RecordingModel, TargetModel,
};

fn sim(width: i32, height: i32, model: impl lichtenberg_models::GrowthModel + 'static) -> Simulator {
    Simulator::new(width, height, Some(Box::new(model)), Directions::ALL).unwrap()
}

// ── Termination ─────────────────────────────────────────────────

#[test]
fn loop_limit_counts_every_iteration() {
    let mut s = sim(16, 16, ConstModel(1.0));
    s.breakdown(8, 8).unwrap();
    let report = s.simulate(25, Hooks::new()).unwrap();
    assert_eq!(report.termination, Termination::LoopLimit);
    assert_eq!(report.loops, 25);
    assert_eq!(report.breaks, 25);
    assert_eq!(report.stalls, 0);
    assert_eq!(s.grid().broken_count(), 26);
    assert_eq!(s.state(), SimState::Terminated);
}

#[test]
fn break_hook_stops_after_reaching_row() {
    let mut s = sim(12, 20, ConstModel(1.0));
    s.breakdown(6, 0).unwrap();
    let report = s
        .simulate(10_000, Hooks::new().on_break(|_x, y| y == 19))
        .unwrap();
    assert_eq!(report.termination, Termination::BreakHook);
    assert!(s.grid().broken_points().any(|p| p.y == 19));
    assert_forest(s.grid());
}

#[test]
fn loop_hook_sees_zero_based_index() {
    let seen = Counter::new(Vec::new());
    let mut s = sim(10, 10, ConstModel(1.0));
    s.breakdown(0, 0).unwrap();
    let report = s
        .simulate(
            100,
            Hooks::new().on_loop(|i, max, grid| {
                let mut v = seen.take();
                v.push((i, max, grid.broken_count()));
                seen.set(v);
                i == 4
            }),
        )
        .unwrap();
    assert_eq!(report.termination, Termination::LoopHook);
    assert_eq!(report.loops, 5);
    let seen = seen.take();
    assert_eq!(seen.len(), 5);
    assert_eq!(seen[0], (0, 100, 2));
    assert_eq!(seen[4], (4, 100, 6));
}

#[test]
fn loop_hook_fires_on_stalls() {
    let fired = Counter::new(0u32);
    let mut s = sim(6, 6, ConstModel(0.0));
    s.breakdown(3, 3).unwrap();
    let report = s
        .simulate(
            10,
            Hooks::new().on_loop(|_, _, _| {
                fired.set(fired.get() + 1);
                false
            }),
        )
        .unwrap();
    assert_eq!(report.stalls, 10);
    assert_eq!(report.breaks, 0);
    assert_eq!(fired.get(), 10);
}

#[test]
fn break_hook_wins_over_loop_hook() {
    let loop_calls = Counter::new(0u32);
    let mut s = sim(8, 8, ConstModel(1.0));
    s.breakdown(0, 0).unwrap();
    let report = s
        .simulate(
            50,
            Hooks::new()
                .on_break(|_, _| true)
                .on_loop(|_, _, _| {
                    loop_calls.set(loop_calls.get() + 1);
                    true
                }),
        )
        .unwrap();
    assert_eq!(report.termination, Termination::BreakHook);
    assert_eq!(report.loops, 1);
    assert_eq!(loop_calls.get(), 0);
}

#[test]
fn model_exhaustion_ends_run() {
    let mut s = sim(16, 16, ExhaustAfter::new(7));
    s.breakdown(8, 8).unwrap();
    let report = s.simulate(1_000, Hooks::new()).unwrap();
    assert_eq!(report.termination, Termination::ModelExhausted);
    assert_eq!(report.breaks, 7);
    assert_eq!(s.grid().broken_count(), 8);
}

#[test]
fn dla_without_walkers_is_exhausted_immediately() {
    let mut s = sim(8, 8, Dla::new(8, 8, 0).unwrap());
    s.breakdown(4, 4).unwrap();
    let report = s.simulate(100, Hooks::new()).unwrap();
    assert_eq!(report.termination, Termination::ModelExhausted);
    assert_eq!(report.loops, 0);
}

#[test]
fn dla_breaks_are_bounded_by_walkers() {
    let mut s = sim(8, 8, Dla::new(8, 8, 20).unwrap());
    s.breakdown(4, 0).unwrap();
    let report = s.simulate(5_000, Hooks::new()).unwrap();
    assert!(report.breaks <= 20, "{report:?}");
    assert_eq!(report.loops, report.breaks + report.stalls);
    if report.termination == Termination::ModelExhausted {
        assert!(s.model().is_exhausted());
    }
    assert_forest(s.grid());
}

#[test]
fn dielectric_never_grows_into_an_electrode() {
    let mut field = Dielectric::uniform_attractor(3, 1);
    field[1][3] = FieldCell::locked(1.0);
    let model = Dielectric::builder(3, 1, field).build().unwrap();
    let mut s = sim(3, 1, model);
    s.breakdown(0, 0).unwrap();
    let report = s.simulate(200, Hooks::new()).unwrap();
    assert!(!s.grid().get_broken(2, 0).unwrap());
    assert_eq!(report.breaks, 1);
    assert_eq!(report.stalls, 199);
    assert_eq!(report.termination, Termination::LoopLimit);
}

// ── Weights ─────────────────────────────────────────────────────

#[test]
fn nan_weights_stall_instead_of_failing() {
    let mut s = sim(5, 5, ConstModel(f64::NAN));
    s.breakdown(2, 2).unwrap();
    let report = s.simulate(3, Hooks::new()).unwrap();
    assert_eq!(report.stalls, 3);
    assert_eq!(s.grid().broken_count(), 1);
}

#[test]
fn negative_weights_stall_instead_of_failing() {
    let mut s = sim(5, 5, ConstModel(-2.0));
    s.breakdown(2, 2).unwrap();
    let report = s.simulate(3, Hooks::new()).unwrap();
    assert_eq!(report.stalls, 3);
    assert_eq!(report.breaks, 0);
}

#[test]
fn growth_follows_the_only_weighted_cells() {
    let path = [Point::new(1, 0), Point::new(2, 0), Point::new(2, 1)];
    let mut s = sim(6, 6, TargetModel::new(path));
    s.breakdown(0, 0).unwrap();
    let report = s.simulate(10, Hooks::new()).unwrap();
    assert_eq!(report.breaks, 3);
    assert_eq!(report.stalls, 7);
    let grid = s.grid();
    assert_eq!(grid.get_parent(2, 1).unwrap(), Some(Point::new(2, 0)));
    assert_eq!(grid.get_count(2, 1).unwrap(), 3);
    assert_eq!(grid.get_max_count(), 3);
}

// ── Model contract ──────────────────────────────────────────────

#[test]
fn prepare_sees_every_break_once_as_fresh() {
    let (model, recording) = RecordingModel::new();
    let mut s = sim(10, 10, model);
    s.breakdown(0, 0).unwrap();
    s.breakdown(9, 9).unwrap();
    let report = s.simulate(30, Hooks::new()).unwrap();
    assert_eq!(recording.prepares.load(Ordering::Relaxed), 30);
    assert_eq!(recording.breaks.load(Ordering::Relaxed), 30);
    // Two seeds on the first prepare, then one fresh cell per prior break.
    assert_eq!(
        recording.fresh_total.load(Ordering::Relaxed),
        2 + report.breaks as usize - 1
    );
}

#[test]
fn second_run_resumes_from_current_grid() {
    let (model, recording) = RecordingModel::new();
    let mut s = sim(10, 10, model);
    s.breakdown(5, 5).unwrap();
    s.simulate(10, Hooks::new()).unwrap();
    let before = recording.fresh_total.load(Ordering::Relaxed);
    s.simulate(5, Hooks::new()).unwrap();
    assert_eq!(s.grid().broken_count(), 16);
    // The resumed run presents the whole structure as fresh once.
    assert_eq!(
        recording.fresh_total.load(Ordering::Relaxed) - before,
        11 + 4
    );
}

#[test]
fn prepare_error_aborts_and_keeps_completed_breaks() {
    let mut s = sim(10, 10, FailingModel::new(4));
    s.breakdown(5, 5).unwrap();
    let err = s.simulate(100, Hooks::new()).unwrap_err();
    assert!(matches!(err, GrowthError::InvalidParameter { name: "failing", .. }));
    assert_eq!(s.grid().broken_count(), 5);
    assert_eq!(s.state(), SimState::Terminated);
    assert_forest(s.grid());
}
