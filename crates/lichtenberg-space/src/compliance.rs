//! Space trait compliance helpers, reused by every backend's tests.

use crate::space::Space;
use lichtenberg_core::Point;

fn all_points(space: &dyn Space) -> Vec<Point> {
    let mut out = Vec::with_capacity(space.cell_count());
    for y in 0..space.height() {
        for x in 0..space.width() {
            out.push(Point::new(x, y));
        }
    }
    out
}

/// Every growth target is in bounds and one Chebyshev step away.
pub fn assert_targets_local(space: &dyn Space) {
    for p in all_points(space) {
        for q in space.growth_targets(p) {
            assert!(space.contains(q), "{q} outside {}", space.name());
            assert_eq!(p.chebyshev(q), 1, "{q} not adjacent to {p}");
        }
    }
}

/// `q in targets(p)` exactly when `p in sources(q)`.
pub fn assert_sources_invert_targets(space: &dyn Space) {
    for p in all_points(space) {
        for q in space.growth_targets(p) {
            assert!(
                space.growth_sources(q).contains(&p),
                "{p} -> {q} is a target but {p} is not a source of {q}"
            );
        }
        for s in space.growth_sources(p) {
            assert!(
                space.growth_targets(s).contains(&p),
                "{s} is a source of {p} but {p} is not a target of {s}"
            );
        }
    }
}

/// Two calls return the same sequence.
pub fn assert_order_deterministic(space: &dyn Space) {
    for p in all_points(space) {
        assert_eq!(space.growth_targets(p), space.growth_targets(p));
        assert_eq!(space.growth_sources(p), space.growth_sources(p));
    }
}

/// Run every compliance check.
pub fn run_full_compliance(space: &dyn Space) {
    assert_targets_local(space);
    assert_sources_invert_targets(space);
    assert_order_deterministic(space);
}
