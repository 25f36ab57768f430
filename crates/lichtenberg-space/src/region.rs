//! Insulation regions and their rasterisation.
//!
//! A [`RegionSpec`] describes a shape in grid coordinates. Compiling it
//! against a grid size clips the shape and yields a [`RegionPlan`]: the
//! in-bounds cells in row-major order, each listed once.

use lichtenberg_core::{GrowthError, Point};

/// A shape of cells to insulate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionSpec {
    /// A single cell. Must lie inside the grid.
    Cell(Point),
    /// Axis-aligned rectangle over the half-open span `[x0, x1) x [y0, y1)`.
    ///
    /// Corners may be given in either order.
    Square {
        /// First corner column.
        x0: i32,
        /// First corner row.
        y0: i32,
        /// Second corner column (exclusive).
        x1: i32,
        /// Second corner row (exclusive).
        y1: i32,
        /// Cover the interior, not just the outline.
        fill: bool,
    },
    /// Midpoint-rasterised circle.
    Circle {
        /// Centre column.
        cx: i32,
        /// Centre row.
        cy: i32,
        /// Radius in cells. Must be `>= 0`.
        radius: i32,
        /// Cover the disk, not just the ring.
        fill: bool,
    },
}

/// A compiled, clipped region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionPlan {
    /// In-bounds cells in row-major order, without duplicates.
    pub points: Vec<Point>,
}

impl RegionPlan {
    /// Number of cells in the plan.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` if the plan covers no cell.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl RegionSpec {
    /// Every cell of the shape, unclipped, in row-major order.
    ///
    /// Cells beyond the `i32` coordinate range are dropped.
    pub fn rasterize(&self) -> Result<Vec<Point>, GrowthError> {
        self.rasterize_within(Window::UNBOUNDED)
    }

    /// Clip the shape to a `width x height` grid.
    ///
    /// Only cells inside the grid are ever enumerated, so the cost is
    /// bounded by the grid size whatever the shape's extent. A shape that
    /// has cells but none inside the grid is `OutOfBounds`, as is a single
    /// cell off the grid. A degenerate (empty) square compiles to an empty
    /// plan.
    pub fn compile(&self, width: i32, height: i32) -> Result<RegionPlan, GrowthError> {
        let window = Window {
            x0: 0,
            y0: 0,
            x1: i64::from(width.max(0)),
            y1: i64::from(height.max(0)),
        };
        let points = self.rasterize_within(window)?;
        if points.is_empty() && !self.is_degenerate() {
            return Err(GrowthError::out_of_bounds(self.anchor(), width, height));
        }
        Ok(RegionPlan { points })
    }

    fn rasterize_within(&self, window: Window) -> Result<Vec<Point>, GrowthError> {
        let mut out = Vec::new();
        match *self {
            Self::Cell(p) => {
                let (x, y) = (i64::from(p.x), i64::from(p.y));
                window.span(&mut out, x, x, y);
            }
            Self::Square {
                x0,
                y0,
                x1,
                y1,
                fill,
            } => square_points(&mut out, window, x0, y0, x1, y1, fill),
            Self::Circle {
                cx,
                cy,
                radius,
                fill,
            } => {
                if radius < 0 {
                    return Err(GrowthError::InvalidParameter {
                        name: "radius",
                        reason: format!("must be >= 0, got {radius}"),
                    });
                }
                circle_points(&mut out, window, cx, cy, radius, fill);
            }
        }
        out.sort_unstable_by_key(|p| (p.y, p.x));
        out.dedup();
        Ok(out)
    }

    /// `true` for a square with a zero-width side, which has no cells.
    fn is_degenerate(&self) -> bool {
        match *self {
            Self::Square { x0, y0, x1, y1, .. } => x0 == x1 || y0 == y1,
            Self::Cell(_) | Self::Circle { .. } => false,
        }
    }

    /// The coordinate reported when the shape misses the grid.
    fn anchor(&self) -> Point {
        match *self {
            Self::Cell(p) => p,
            Self::Square { x0, y0, .. } => Point::new(x0, y0),
            Self::Circle { cx, cy, .. } => Point::new(cx, cy),
        }
    }
}

// ── Clipping ────────────────────────────────────────────────────────

/// Half-open clip rectangle `[x0, x1) x [y0, y1)`, always within the
/// `i32` range.
#[derive(Clone, Copy, Debug)]
struct Window {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl Window {
    const UNBOUNDED: Self = Self {
        x0: i32::MIN as i64,
        y0: i32::MIN as i64,
        x1: i32::MAX as i64 + 1,
        y1: i32::MAX as i64 + 1,
    };

    /// Rows `[lo, hi]` clipped to the window.
    fn rows(&self, lo: i64, hi: i64) -> std::ops::Range<i64> {
        lo.max(self.y0)..(hi + 1).min(self.y1)
    }

    /// Push `(x, y)` for every `x` in `[lo, hi]` that lies in the window.
    fn span(&self, out: &mut Vec<Point>, lo: i64, hi: i64, y: i64) {
        if y < self.y0 || y >= self.y1 {
            return;
        }
        // Both bounds sit inside the window, so the casts cannot truncate.
        for x in lo.max(self.x0)..=hi.min(self.x1 - 1) {
            out.push(Point::new(x as i32, y as i32));
        }
    }
}

fn square_points(
    out: &mut Vec<Point>,
    window: Window,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    fill: bool,
) {
    let (xa, xb) = (i64::from(x0.min(x1)), i64::from(x0.max(x1)));
    let (ya, yb) = (i64::from(y0.min(y1)), i64::from(y0.max(y1)));
    if xa == xb || ya == yb {
        return;
    }
    for y in window.rows(ya, yb - 1) {
        if fill || y == ya || y == yb - 1 {
            window.span(out, xa, xb - 1, y);
        } else {
            window.span(out, xa, xa, y);
            window.span(out, xb - 1, xb - 1, y);
        }
    }
}

// ── Circle ──────────────────────────────────────────────────────────

/// Michener's midpoint circle in closed form.
///
/// The iterative algorithm walks one octant, `dx` from 0 while
/// `dx <= dy`, pairing each `dx` with
/// `dy(dx) = max { y : y * (y - 1) <= r^2 - dx^2 - 1 }`, and mirrors the
/// point eightfold. Solving for `dy` directly lets each row be produced
/// on its own, so only rows inside the clip window are visited.
#[derive(Clone, Copy, Debug)]
struct Octant {
    r2: i128,
    last: i64,
}

impl Octant {
    /// Requires `radius >= 1`.
    fn new(radius: i64) -> Self {
        let mut octant = Self {
            r2: i128::from(radius) * i128::from(radius),
            last: 0,
        };
        // dx <= dy(dx) holds for a prefix of [0, radius]; find its end.
        let (mut lo, mut hi) = (0, radius);
        while lo < hi {
            let mid = lo + (hi - lo + 1) / 2;
            if octant.dy(mid).is_some_and(|dy| mid <= dy) {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        octant.last = lo;
        octant
    }

    /// The `dy` paired with `dx`, if the octant reaches that far.
    fn dy(&self, dx: i64) -> Option<i64> {
        let m = self.r2 - i128::from(dx) * i128::from(dx) - 1;
        if m < 0 {
            return None;
        }
        // y * (y - 1) <= m  <=>  (2y - 1)^2 <= 4m + 1
        Some(((4 * m + 1).isqrt() as i64 + 1) / 2)
    }

    /// The largest plotted `dx` whose `dy` is at least `t`.
    fn reach(&self, t: i64) -> Option<i64> {
        let t = i128::from(t);
        let v = self.r2 - 1 - t * (t - 1);
        if v < 0 {
            return None;
        }
        Some((v.isqrt() as i64).min(self.last))
    }

    /// The plotted `dx` values whose `dy` is exactly `t`, as `[lo, hi]`.
    fn columns(&self, t: i64) -> Option<(i64, i64)> {
        let hi = self.reach(t)?;
        let lo = self.reach(t + 1).map_or(0, |h| h + 1);
        (lo <= hi).then_some((lo, hi))
    }
}

fn circle_points(
    out: &mut Vec<Point>,
    window: Window,
    cx: i32,
    cy: i32,
    radius: i32,
    fill: bool,
) {
    let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
    if r == 0 {
        window.span(out, cx, cx, cy);
        return;
    }
    let octant = Octant::new(r);
    for y in window.rows(cy - r, cy + r) {
        let t = (y - cy).abs();
        // Row as the mirrored dx of a plotted point: x = cx +- dy(t).
        let across = if t <= octant.last { octant.dy(t) } else { None };
        // Row as the mirrored dy: x = cx +- dx for every dx with dy(dx) = t.
        let along = octant.columns(t);
        if fill {
            let half = across.max(along.map(|(_, hi)| hi));
            if let Some(half) = half {
                window.span(out, cx - half, cx + half, y);
            }
        } else {
            if let Some(dy) = across {
                window.span(out, cx - dy, cx - dy, y);
                window.span(out, cx + dy, cx + dy, y);
            }
            if let Some((lo, hi)) = along {
                window.span(out, cx - hi, cx - lo, y);
                window.span(out, cx + lo, cx + hi, y);
            }
        }
    }
}
