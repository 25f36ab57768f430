//! Grid hashing for archive trailers and determinism checks.
//!
//! Uses FNV-1a for fast, deterministic hashing. These hashes are not
//! cryptographically secure; they detect accidental corruption and
//! divergence between runs.

use lichtenberg_core::{Cell, CellGrid};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Flag bit: the cell is broken.
pub(crate) const FLAG_BROKEN: u8 = 1;
/// Flag bit: the cell is insulated.
pub(crate) const FLAG_INSULATED: u8 = 2;
/// Flag bit: a parent coordinate follows.
pub(crate) const FLAG_HAS_PARENT: u8 = 4;

pub(crate) fn flags_of(cell: &Cell) -> u8 {
    let mut flags = 0;
    if cell.broken {
        flags |= FLAG_BROKEN;
    }
    if cell.insulated {
        flags |= FLAG_INSULATED;
    }
    if cell.parent.is_some() {
        flags |= FLAG_HAS_PARENT;
    }
    flags
}

/// Hash dimensions and raw cell records.
///
/// Each cell contributes exactly the bytes the codec writes for it, so
/// the hash of a decoded record set can be compared to the trailer
/// before the records are validated.
pub(crate) fn cells_hash(width: u32, height: u32, cells: &[Cell]) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_bytes(hash, &width.to_le_bytes());
    hash = fnv1a_bytes(hash, &height.to_le_bytes());
    for cell in cells {
        hash = fnv1a_bytes(hash, &[flags_of(cell)]);
        hash = fnv1a_bytes(hash, &cell.count.to_le_bytes());
        if let Some(p) = cell.parent {
            hash = fnv1a_bytes(hash, &p.x.to_le_bytes());
            hash = fnv1a_bytes(hash, &p.y.to_le_bytes());
        }
    }
    hash
}

/// Hash a grid's dimensions and every cell.
///
/// Two grids hash equal if they compare equal. The empty default grid
/// hashes to the FNV-1a offset basis folded with two zero dimensions.
pub fn grid_hash(grid: &CellGrid) -> u64 {
    cells_hash(
        grid.width().max(0) as u32,
        grid.height().max(0) as u32,
        grid.cells(),
    )
}
