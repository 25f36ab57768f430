//! Shared helpers for the 2D lattice backends (Square4, Square8).

use crate::directions::Directions;
use lichtenberg_core::GrowthError;
use smallvec::SmallVec;

/// Offset list sized for the widest backend.
pub(crate) type Offsets = SmallVec<[(i32, i32); 8]>;

/// Validate lattice dimensions.
pub(crate) fn check_dims(width: i32, height: i32) -> Result<(), GrowthError> {
    if width <= 0 || height <= 0 {
        return Err(GrowthError::InvalidSize { width, height });
    }
    Ok(())
}

/// Keep the offsets of `all` that `directions` permits, in order.
pub(crate) fn permitted(all: &[(i32, i32)], directions: Directions) -> Offsets {
    all.iter()
        .copied()
        .filter(|&(dx, dy)| directions.allows(dx, dy))
        .collect()
}
