//! The growth simulator.
//!
//! [`Simulator`] owns a [`CellGrid`], a lattice [`Space`], a boxed
//! [`GrowthModel`] and a `ChaCha8Rng`. Callers seed it with
//! [`breakdown`](Simulator::breakdown), optionally carve insulation, and
//! then run [`simulate`](Simulator::simulate), which grows one cell per
//! loop until a stop condition fires.
//!
//! # Determinism
//!
//! Given the same seed, model state, and sequence of calls, two
//! simulators produce identical grids. The frontier is enumerated in
//! insertion order, weights are sampled with a single owned RNG, and no
//! process-wide state is consulted.
//!
//! # State machine
//!
//! ```text
//! Idle ──breakdown──▶ Seeded ──simulate──▶ Terminated
//!                       ▲                     │
//!                       └──────breakdown──────┘
//! ```
//!
//! The simulator is in `Growing` only inside `simulate`.

use lichtenberg_core::{CellGrid, GrowthError, Point};
use lichtenberg_models::{GrowthContext, GrowthModel, Uniform};
use lichtenberg_space::{Directions, RegionSpec, Space};
use log::{debug, trace, warn};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{ParentPolicy, SimulatorConfig};
use crate::frontier::Frontier;
use crate::hooks::Hooks;
use crate::report::{SimulationReport, Termination};

// Compile-time assertion: Simulator can move between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulator>();
    }
};

// ── SimState ────────────────────────────────────────────────────

/// Lifecycle state of a [`Simulator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimState {
    /// Constructed; no seed yet.
    Idle,
    /// At least one seed placed since the last run.
    Seeded,
    /// Inside `simulate`.
    Growing,
    /// A run has finished.
    Terminated,
}

// ── Simulator ───────────────────────────────────────────────────

/// Grows a discharge structure on a grid.
///
/// # Example
///
/// ```
/// use lichtenberg_engine::{Hooks, Simulator, Termination};
/// use lichtenberg_space::Directions;
///
/// let mut sim = Simulator::new(32, 32, None, Directions::ALL)?;
/// sim.breakdown(16, 0)?;
/// let report = sim.simulate(100, Hooks::new())?;
/// assert_eq!(report.termination, Termination::LoopLimit);
/// assert_eq!(sim.grid().broken_count(), 101);
/// # Ok::<(), lichtenberg_core::GrowthError>(())
/// ```
#[derive(Debug)]
pub struct Simulator {
    grid: CellGrid,
    space: Box<dyn Space>,
    model: Box<dyn GrowthModel>,
    rng: ChaCha8Rng,
    parent_policy: ParentPolicy,
    state: SimState,
}

impl Simulator {
    /// A `width x height` simulator with default settings.
    ///
    /// `model` defaults to [`Uniform`]. The RNG is seeded with 0; use
    /// [`from_config`](Self::from_config) to choose a seed.
    pub fn new(
        width: i32,
        height: i32,
        model: Option<Box<dyn GrowthModel>>,
        directions: Directions,
    ) -> Result<Self, GrowthError> {
        let config = SimulatorConfig {
            width,
            height,
            directions,
            ..SimulatorConfig::default()
        };
        Self::from_config(config, model)
    }

    /// Build from a validated configuration.
    ///
    /// Fails with `ShapeMismatch` if the model was built for a different
    /// grid size.
    pub fn from_config(
        config: SimulatorConfig,
        model: Option<Box<dyn GrowthModel>>,
    ) -> Result<Self, GrowthError> {
        config.validate()?;
        let grid = CellGrid::new(config.width, config.height)?;
        let space = config
            .connectivity
            .build(config.width, config.height, config.directions)?;
        let model = model.unwrap_or_else(|| Box::new(Uniform));
        if let Some((w, h)) = model.dimensions() {
            if (w, h) != (config.width, config.height) {
                return Err(GrowthError::ShapeMismatch {
                    expected: format!("{}x{} model", config.width, config.height),
                    found: format!("{w}x{h} model '{}'", model.name()),
                });
            }
        }
        Ok(Self {
            grid,
            space,
            model,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            parent_policy: config.parent_policy,
            state: SimState::Idle,
        })
    }

    /// Replace the RNG with a caller-supplied one.
    pub fn with_rng(mut self, rng: ChaCha8Rng) -> Self {
        self.rng = rng;
        self
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The grid.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Take the grid, dropping the simulator.
    pub fn into_grid(self) -> CellGrid {
        self.grid
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// The growth model.
    pub fn model(&self) -> &dyn GrowthModel {
        self.model.as_ref()
    }

    /// The lattice.
    pub fn space(&self) -> &dyn Space {
        self.space.as_ref()
    }

    // ── Seeding and insulation ──────────────────────────────────

    /// Place a seed (a root with count 0) at `(x, y)`.
    ///
    /// An insulated target is accepted here and rejected by
    /// [`simulate`](Self::simulate).
    pub fn breakdown(&mut self, x: i32, y: i32) -> Result<(), GrowthError> {
        self.grid.mark_broken(x, y, None, 0)?;
        self.state = SimState::Seeded;
        Ok(())
    }

    /// Exclude `(x, y)` from growth.
    pub fn insulate(&mut self, x: i32, y: i32) -> Result<(), GrowthError> {
        self.grid.mark_insulated(x, y)?;
        Ok(())
    }

    /// Insulate a circle of radius `r` around `(cx, cy)`.
    ///
    /// Returns the number of cells newly insulated.
    pub fn insulate_circle(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        fill: bool,
    ) -> Result<usize, GrowthError> {
        self.insulate_region(&RegionSpec::Circle {
            cx,
            cy,
            radius: r,
            fill,
        })
    }

    /// Insulate the half-open rectangle `[x0, x1) x [y0, y1)`.
    ///
    /// Returns the number of cells newly insulated.
    pub fn insulate_square(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        fill: bool,
    ) -> Result<usize, GrowthError> {
        self.insulate_region(&RegionSpec::Square {
            x0,
            y0,
            x1,
            y1,
            fill,
        })
    }

    /// Clip `region` to the grid and insulate every cell of it.
    ///
    /// The whole plan is checked before the grid is touched: a shape
    /// covering a grown cell fails with `InvalidTransition` and leaves the
    /// grid unchanged.
    pub fn insulate_region(&mut self, region: &RegionSpec) -> Result<usize, GrowthError> {
        let plan = region.compile(self.grid.width(), self.grid.height())?;
        for &p in &plan.points {
            let cell = self.grid.cell(p.x, p.y)?;
            if cell.broken && !cell.is_root() {
                return Err(GrowthError::transition(p, "a grown cell cannot be insulated"));
            }
        }
        let mut insulated = 0;
        for &p in &plan.points {
            if self.grid.mark_insulated(p.x, p.y)? {
                insulated += 1;
            }
        }
        Ok(insulated)
    }

    // ── Growth ──────────────────────────────────────────────────

    /// Grow for at most `max_loop` iterations.
    ///
    /// # Errors
    ///
    /// `NoSeed` if nothing has been broken, `InvalidSeed` if a seed is
    /// insulated. Both are checked before anything changes. Errors raised
    /// by the model's `prepare` end the run early and leave the grid as
    /// it was after the last completed break.
    pub fn simulate(
        &mut self,
        max_loop: u32,
        mut hooks: Hooks<'_>,
    ) -> Result<SimulationReport, GrowthError> {
        let roots: Vec<Point> = self.grid.roots().collect();
        if roots.is_empty() {
            return Err(GrowthError::NoSeed);
        }
        if let Some(p) = roots
            .iter()
            .find(|p| self.grid.get_insulated(p.x, p.y).unwrap_or(false))
        {
            return Err(GrowthError::InvalidSeed { x: p.x, y: p.y });
        }

        self.state = SimState::Growing;
        let result = self.run(max_loop, &mut hooks, roots.len());
        self.state = SimState::Terminated;
        result
    }

    fn run(
        &mut self,
        max_loop: u32,
        hooks: &mut Hooks<'_>,
        seeds: usize,
    ) -> Result<SimulationReport, GrowthError> {
        let mut frontier = Frontier::build(&self.grid, self.space.as_ref());
        let mut fresh: Vec<Point> = self.grid.broken_points().collect();
        debug!(
            "simulate: model '{}', {} seeds, {} broken, frontier {}, max_loop {}",
            self.model.name(),
            seeds,
            fresh.len(),
            frontier.len(),
            max_loop
        );

        let mut loops = 0u32;
        let mut breaks = 0u32;
        let mut stalls = 0u32;
        let termination = loop {
            if loops >= max_loop {
                break Termination::LoopLimit;
            }
            if frontier.is_empty() {
                break Termination::FrontierExhausted;
            }
            if self.model.is_exhausted() {
                break Termination::ModelExhausted;
            }

            let candidates = frontier.to_vec();
            {
                let mut ctx = GrowthContext::new(&self.grid, &candidates, &fresh, &mut self.rng);
                self.model.prepare(&mut ctx)?;
            }
            fresh.clear();

            let weights = self.weights(&candidates);
            let mut stop = None;
            if weights.iter().sum::<f64>() > 0.0 {
                let dist = WeightedIndex::new(&weights).map_err(|e| {
                    GrowthError::InvalidParameter {
                        name: "weights",
                        reason: e.to_string(),
                    }
                })?;
                let winner = candidates[dist.sample(&mut self.rng)];
                self.grow(winner)?;
                frontier.remove(winner);
                frontier.extend_from(&self.grid, self.space.as_ref(), winner);
                self.model.on_break(winner);
                fresh.push(winner);
                breaks += 1;
                trace!("loop {loops}: broke {winner}");

                if hooks.fire_break(winner.x, winner.y) {
                    stop = Some(Termination::BreakHook);
                }
            } else {
                stalls += 1;
                trace!("loop {loops}: stall over {} candidates", candidates.len());
            }

            if stop.is_none() && hooks.fire_loop(loops, max_loop, &self.grid) {
                stop = Some(Termination::LoopHook);
            }
            loops += 1;
            if let Some(t) = stop {
                break t;
            }
        };

        let report = SimulationReport {
            loops,
            breaks,
            stalls,
            termination,
        };
        debug!(
            "simulate finished: {termination} after {loops} loops ({breaks} breaks, {stalls} stalls), max count {}",
            self.grid.get_max_count()
        );
        Ok(report)
    }

    /// Sanitised model weights, one per candidate.
    fn weights(&self, candidates: &[Point]) -> Vec<f64> {
        let mut rejected = 0usize;
        let weights = candidates
            .iter()
            .map(|&p| {
                let w = self.model.weight_at(&self.grid, p);
                if w.is_finite() && w >= 0.0 {
                    w
                } else {
                    rejected += 1;
                    0.0
                }
            })
            .collect();
        if rejected > 0 {
            warn!(
                "model '{}' returned {rejected} non-finite or negative weights; treated as 0",
                self.model.name()
            );
        }
        weights
    }

    /// Break `winner` under a parent chosen by the configured policy.
    fn grow(&mut self, winner: Point) -> Result<(), GrowthError> {
        let sources: Vec<(Point, u32)> = self
            .space
            .growth_sources(winner)
            .into_iter()
            .filter_map(|p| {
                let cell = self.grid.cell(p.x, p.y).ok()?;
                cell.broken.then_some((p, cell.count))
            })
            .collect();

        let chosen = match self.parent_policy {
            ParentPolicy::FirstFound => sources.first().copied(),
            ParentPolicy::ShortestPath => sources
                .iter()
                .copied()
                .fold(None, |best: Option<(Point, u32)>, s| match best {
                    Some(b) if b.1 <= s.1 => Some(b),
                    _ => Some(s),
                }),
            ParentPolicy::Random => {
                if sources.is_empty() {
                    None
                } else {
                    Some(sources[self.rng.random_range(0..sources.len())])
                }
            }
        };
        let (parent, count) =
            chosen.ok_or_else(|| GrowthError::transition(winner, "no broken neighbour to grow from"))?;
        self.grid
            .mark_broken(winner.x, winner.y, Some(parent), count + 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_LOOP;
    use lichtenberg_space::Connectivity;

    #[derive(Debug)]
    struct Zero;

    impl GrowthModel for Zero {
        fn name(&self) -> &str {
            "zero"
        }
        fn weight_at(&self, _grid: &CellGrid, _p: Point) -> f64 {
            0.0
        }
    }

    #[derive(Debug)]
    struct Sized3;

    impl GrowthModel for Sized3 {
        fn name(&self) -> &str {
            "sized"
        }
        fn dimensions(&self) -> Option<(i32, i32)> {
            Some((3, 3))
        }
        fn weight_at(&self, _grid: &CellGrid, _p: Point) -> f64 {
            1.0
        }
    }

    fn sim(width: i32, height: i32) -> Simulator {
        Simulator::new(width, height, None, Directions::ALL).unwrap()
    }

    #[test]
    fn invalid_size_rejected() {
        assert!(matches!(
            Simulator::new(0, 5, None, Directions::ALL),
            Err(GrowthError::InvalidSize { .. })
        ));
    }

    #[test]
    fn model_size_must_match_grid() {
        let result = Simulator::new(4, 4, Some(Box::new(Sized3)), Directions::ALL);
        assert!(matches!(result, Err(GrowthError::ShapeMismatch { .. })));
        assert!(Simulator::new(3, 3, Some(Box::new(Sized3)), Directions::ALL).is_ok());
    }

    #[test]
    fn state_machine_transitions() {
        let mut s = sim(4, 4);
        assert_eq!(s.state(), SimState::Idle);
        s.breakdown(0, 0).unwrap();
        assert_eq!(s.state(), SimState::Seeded);
        s.simulate(2, Hooks::new()).unwrap();
        assert_eq!(s.state(), SimState::Terminated);
        s.breakdown(3, 3).unwrap();
        assert_eq!(s.state(), SimState::Seeded);
    }

    #[test]
    fn breakdown_sets_root_count_zero() {
        let mut s = sim(5, 5);
        s.breakdown(2, 3).unwrap();
        assert!(s.grid().get_broken(2, 3).unwrap());
        assert_eq!(s.grid().get_count(2, 3).unwrap(), 0);
        assert_eq!(s.grid().get_parent(2, 3).unwrap(), None);
    }

    #[test]
    fn breakdown_and_insulate_bounds() {
        let mut s = sim(5, 4);
        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 4)] {
            assert!(matches!(
                s.breakdown(x, y),
                Err(GrowthError::OutOfBounds { .. })
            ));
            assert!(matches!(
                s.insulate(x, y),
                Err(GrowthError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn simulate_without_seed_is_no_seed() {
        let mut s = sim(3, 3);
        assert_eq!(s.simulate(10, Hooks::new()), Err(GrowthError::NoSeed));
        assert_eq!(s.state(), SimState::Idle);
    }

    #[test]
    fn insulated_seed_rejected_without_mutation() {
        let mut s = sim(3, 3);
        s.insulate(1, 1).unwrap();
        s.breakdown(1, 1).unwrap();
        let before = s.grid().clone();
        assert_eq!(
            s.simulate(10, Hooks::new()),
            Err(GrowthError::InvalidSeed { x: 1, y: 1 })
        );
        assert_eq!(s.grid(), &before);
    }

    #[test]
    fn zero_loops_is_loop_limit() {
        let mut s = sim(3, 3);
        s.breakdown(1, 1).unwrap();
        let r = s.simulate(0, Hooks::new()).unwrap();
        assert_eq!(r.termination, Termination::LoopLimit);
        assert_eq!(r.loops, 0);
        assert_eq!(s.grid().broken_count(), 1);
    }

    #[test]
    fn fills_grid_then_exhausts_frontier() {
        let mut s = sim(4, 3);
        s.breakdown(0, 0).unwrap();
        let r = s.simulate(MAX_LOOP, Hooks::new()).unwrap();
        assert_eq!(r.termination, Termination::FrontierExhausted);
        assert_eq!(r.breaks, 11);
        assert_eq!(r.loops, 11);
        assert_eq!(s.grid().broken_count(), 12);
    }

    #[test]
    fn all_zero_weights_stall() {
        let mut s = Simulator::new(3, 3, Some(Box::new(Zero)), Directions::ALL).unwrap();
        s.breakdown(1, 1).unwrap();
        let r = s.simulate(5, Hooks::new()).unwrap();
        assert_eq!(r.stalls, 5);
        assert_eq!(r.breaks, 0);
        assert_eq!(r.termination, Termination::LoopLimit);
    }

    /// Two broken neighbours of (1, 1): (1, 0) at count 2, first in
    /// offset order, and (0, 1) at count 1.
    fn contested(policy: ParentPolicy) -> Simulator {
        let config = SimulatorConfig {
            width: 4,
            height: 3,
            parent_policy: policy,
            ..SimulatorConfig::default()
        };
        let mut s = Simulator::from_config(config, None).unwrap();
        s.breakdown(0, 0).unwrap();
        s.breakdown(3, 0).unwrap();
        s.grid.mark_broken(0, 1, Some(Point::new(0, 0)), 1).unwrap();
        s.grid.mark_broken(2, 0, Some(Point::new(3, 0)), 1).unwrap();
        s.grid.mark_broken(1, 0, Some(Point::new(2, 0)), 2).unwrap();
        s
    }

    #[test]
    fn shortest_path_takes_smallest_count() {
        let mut s = contested(ParentPolicy::ShortestPath);
        s.grow(Point::new(1, 1)).unwrap();
        assert_eq!(s.grid().get_parent(1, 1).unwrap(), Some(Point::new(0, 1)));
        assert_eq!(s.grid().get_count(1, 1).unwrap(), 2);
    }

    #[test]
    fn first_found_takes_offset_order() {
        let mut s = contested(ParentPolicy::FirstFound);
        s.grow(Point::new(1, 1)).unwrap();
        assert_eq!(s.grid().get_parent(1, 1).unwrap(), Some(Point::new(1, 0)));
        assert_eq!(s.grid().get_count(1, 1).unwrap(), 3);
    }

    #[test]
    fn random_policy_picks_a_broken_neighbour() {
        let mut s = contested(ParentPolicy::Random);
        s.grow(Point::new(1, 1)).unwrap();
        let parent = s.grid().get_parent(1, 1).unwrap().unwrap();
        assert!(parent == Point::new(1, 0) || parent == Point::new(0, 1));
    }

    #[test]
    fn growing_an_isolated_cell_fails() {
        let mut s = sim(4, 4);
        s.breakdown(0, 0).unwrap();
        assert!(matches!(
            s.grow(Point::new(3, 3)),
            Err(GrowthError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn insulation_blocks_growth() {
        let mut s = sim(5, 5);
        s.insulate_square(0, 2, 5, 3, true).unwrap();
        s.breakdown(2, 0).unwrap();
        let r = s.simulate(MAX_LOOP, Hooks::new()).unwrap();
        assert_eq!(r.termination, Termination::FrontierExhausted);
        for y in 3..5 {
            for x in 0..5 {
                assert!(!s.grid().get_broken(x, y).unwrap());
            }
        }
        assert_eq!(s.grid().broken_count(), 10);
    }

    #[test]
    fn eight_connectivity_grows_diagonally() {
        let config = SimulatorConfig {
            width: 3,
            height: 3,
            connectivity: Connectivity::Eight,
            directions: Directions::new(false, true, false, true),
            ..SimulatorConfig::default()
        };
        let mut s = Simulator::from_config(config, None).unwrap();
        s.breakdown(0, 0).unwrap();
        s.simulate(MAX_LOOP, Hooks::new()).unwrap();
        assert_eq!(s.grid().broken_count(), 9);
        assert_eq!(s.grid().get_count(1, 1).unwrap(), 1);
    }

    #[test]
    fn region_over_grown_cell_is_rejected_atomically() {
        let mut s = sim(4, 4);
        s.breakdown(0, 0).unwrap();
        s.simulate(3, Hooks::new()).unwrap();
        let before = s.grid().clone();
        assert!(matches!(
            s.insulate_square(0, 0, 4, 4, true),
            Err(GrowthError::InvalidTransition { .. })
        ));
        assert_eq!(s.grid(), &before);
    }

    #[test]
    fn region_counts_new_cells_only() {
        let mut s = sim(6, 6);
        assert_eq!(s.insulate_square(0, 0, 2, 2, true).unwrap(), 4);
        assert_eq!(s.insulate_square(0, 0, 3, 3, true).unwrap(), 5);
        assert!(matches!(
            s.insulate_circle(-20, -20, 2, false),
            Err(GrowthError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn oversized_regions_insulate_only_the_grid() {
        let mut s = sim(10, 10);
        assert!(matches!(
            s.insulate_circle(5, 5, i32::MAX / 2 + 1, false),
            Err(GrowthError::OutOfBounds { .. })
        ));
        assert_eq!(s.insulate_circle(5, 5, i32::MAX, true).unwrap(), 100);

        let mut s = sim(10, 10);
        assert_eq!(s.insulate_square(0, 0, 100_000, 100_000, true).unwrap(), 100);
    }
}
