//! Diffusion-limited aggregation.
//!
//! A fixed population of walkers drifts over the grid. A frontier cell
//! grows only while a walker stands on it, and breaking the cell consumes
//! every walker there. Once no walker is left the model is exhausted.

use crate::context::GrowthContext;
use crate::model::{self, GrowthModel};
use lichtenberg_core::{CellGrid, GrowthError, Point};
use rand::Rng;
use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Walker {
    x: f64,
    y: f64,
    live: bool,
}

impl Walker {
    /// Cell the walker stands on: positions round half up.
    fn cell(&self) -> Point {
        Point::new((self.x + 0.5).floor() as i32, (self.y + 0.5).floor() as i32)
    }
}

/// Growth driven by random walkers.
#[derive(Debug, Clone)]
pub struct Dla {
    width: i32,
    height: i32,
    num_particle: usize,
    walkers: Vec<Walker>,
    occupancy: Vec<u32>,
    live: usize,
    placed: bool,
}

impl Dla {
    /// `num_particle` walkers on a `width x height` grid.
    ///
    /// Walkers are placed on the first `prepare`, from the simulator's RNG.
    pub fn new(width: i32, height: i32, num_particle: usize) -> Result<Self, GrowthError> {
        model::check_size(width, height)?;
        Ok(Self {
            width,
            height,
            num_particle,
            walkers: Vec::with_capacity(num_particle),
            occupancy: vec![0; width as usize * height as usize],
            live: 0,
            placed: false,
        })
    }

    /// Walkers not yet consumed.
    pub fn live_walkers(&self) -> usize {
        if self.placed {
            self.live
        } else {
            self.num_particle
        }
    }

    /// Number of live walkers on `p`.
    pub fn walkers_at(&self, p: Point) -> u32 {
        model::index(self.width, self.height, p).map_or(0, |i| self.occupancy[i])
    }

    fn place<R: Rng>(&mut self, rng: &mut R) {
        let (xmax, ymax) = (f64::from(self.width - 1), f64::from(self.height - 1));
        for _ in 0..self.num_particle {
            let walker = Walker {
                x: rng.random::<f64>() * xmax,
                y: rng.random::<f64>() * ymax,
                live: true,
            };
            if let Some(i) = model::index(self.width, self.height, walker.cell()) {
                self.occupancy[i] += 1;
            }
            self.walkers.push(walker);
        }
        self.live = self.num_particle;
        self.placed = true;
    }

    fn wander<R: Rng>(&mut self, rng: &mut R) {
        let (width, height) = (self.width, self.height);
        for walker in self.walkers.iter_mut().filter(|w| w.live) {
            let r: f64 = rng.random();
            let theta = rng.random::<f64>() * TAU;
            let moved = Walker {
                x: walker.x + r * theta.cos(),
                y: walker.y + r * theta.sin(),
                live: true,
            };
            let (from, to) = (walker.cell(), moved.cell());
            let Some(j) = model::index(width, height, to) else {
                continue;
            };
            if from != to {
                if let Some(i) = model::index(width, height, from) {
                    self.occupancy[i] -= 1;
                }
                self.occupancy[j] += 1;
            }
            *walker = moved;
        }
    }
}

impl GrowthModel for Dla {
    fn name(&self) -> &str {
        "dla"
    }

    fn dimensions(&self) -> Option<(i32, i32)> {
        Some((self.width, self.height))
    }

    fn prepare(&mut self, ctx: &mut GrowthContext<'_>) -> Result<(), GrowthError> {
        if !self.placed {
            self.place(ctx.rng());
        }
        self.wander(ctx.rng());
        Ok(())
    }

    fn weight_at(&self, _grid: &CellGrid, p: Point) -> f64 {
        if self.walkers_at(p) > 0 {
            1.0
        } else {
            0.0
        }
    }

    fn on_break(&mut self, p: Point) {
        let Some(i) = model::index(self.width, self.height, p) else {
            return;
        };
        if self.occupancy[i] == 0 {
            return;
        }
        for walker in self.walkers.iter_mut().filter(|w| w.live) {
            if walker.cell() == p {
                walker.live = false;
                self.live -= 1;
            }
        }
        self.occupancy[i] = 0;
    }

    fn is_exhausted(&self) -> bool {
        self.live_walkers() == 0
    }
}
