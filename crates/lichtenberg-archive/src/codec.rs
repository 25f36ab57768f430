//! Binary encode/decode for the grid archive format.
//!
//! All integers are little-endian. The format has no compression and no
//! alignment padding:
//!
//! ```text
//! [MAGIC "LCHT"] [VERSION u8] [width u32] [height u32]
//! per cell, row-major: [flags u8] [count u32] [parent x i32, parent y i32]?
//! [grid_hash u64]
//! ```
//!
//! The parent coordinate is present only when the `has_parent` flag bit
//! is set.

use std::io::{self, Read, Write};

use lichtenberg_core::{Cell, CellGrid, GrowthError, Point};

use crate::error::ArchiveError;
use crate::hash::{cells_hash, flags_of, FLAG_BROKEN, FLAG_HAS_PARENT, FLAG_INSULATED};
use crate::{FORMAT_VERSION, MAGIC};

const KNOWN_FLAGS: u8 = FLAG_BROKEN | FLAG_INSULATED | FLAG_HAS_PARENT;

/// Largest cell count a decoder will accept; the same cap
/// [`CellGrid::new`] enforces.
pub const MAX_CELLS: u64 = lichtenberg_core::MAX_CELLS;

// ── Primitive writers ───────────────────────────────────────────

fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ArchiveError> {
    w.write_all(&[v])?;
    Ok(())
}

fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ArchiveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<(), ArchiveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), ArchiveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read exactly `N` bytes, reporting a short read as `Malformed`.
fn read_array<const N: usize>(r: &mut dyn Read, what: &str) -> Result<[u8; N], ArchiveError> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            ArchiveError::Malformed {
                detail: format!("truncated while reading {what}"),
            }
        } else {
            ArchiveError::Io(e)
        }
    })?;
    Ok(buf)
}

fn read_u8(r: &mut dyn Read, what: &str) -> Result<u8, ArchiveError> {
    Ok(read_array::<1>(r, what)?[0])
}

fn read_u32_le(r: &mut dyn Read, what: &str) -> Result<u32, ArchiveError> {
    Ok(u32::from_le_bytes(read_array(r, what)?))
}

fn read_i32_le(r: &mut dyn Read, what: &str) -> Result<i32, ArchiveError> {
    Ok(i32::from_le_bytes(read_array(r, what)?))
}

fn read_u64_le(r: &mut dyn Read, what: &str) -> Result<u64, ArchiveError> {
    Ok(u64::from_le_bytes(read_array(r, what)?))
}

// ── Grid encode/decode ──────────────────────────────────────────

/// Encode `grid` to `w`.
///
/// The empty default grid cannot be encoded and yields
/// `ArchiveError::Grid(InvalidSize)`.
pub fn encode_grid(w: &mut dyn Write, grid: &CellGrid) -> Result<(), ArchiveError> {
    if !grid.is_valid() {
        return Err(GrowthError::InvalidSize {
            width: grid.width(),
            height: grid.height(),
        }
        .into());
    }
    let (width, height) = (grid.width() as u32, grid.height() as u32);

    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_u32_le(w, width)?;
    write_u32_le(w, height)?;

    for cell in grid.cells() {
        write_u8(w, flags_of(cell))?;
        write_u32_le(w, cell.count)?;
        if let Some(p) = cell.parent {
            write_i32_le(w, p.x)?;
            write_i32_le(w, p.y)?;
        }
    }

    write_u64_le(w, cells_hash(width, height, grid.cells()))?;
    Ok(())
}

/// Decode a grid from `r`.
///
/// Checks run in order: magic, version, dimensions, per-cell flags, the
/// trailer hash, trailing data, and finally the grid invariants via
/// [`CellGrid::from_cells`].
pub fn decode_grid(r: &mut dyn Read) -> Result<CellGrid, ArchiveError> {
    let magic: [u8; 4] = read_array(r, "magic")?;
    if magic != MAGIC {
        return Err(ArchiveError::InvalidMagic);
    }
    let version = read_u8(r, "version")?;
    if version != FORMAT_VERSION {
        return Err(ArchiveError::UnsupportedVersion { found: version });
    }

    let width = read_u32_le(r, "width")?;
    let height = read_u32_le(r, "height")?;
    let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(ArchiveError::Malformed {
            detail: format!("dimensions {width}x{height} exceed i32"),
        });
    };
    if w == 0 || h == 0 {
        return Err(GrowthError::InvalidSize {
            width: w,
            height: h,
        }
        .into());
    }
    let total = u64::from(width) * u64::from(height);
    if total > MAX_CELLS {
        return Err(ArchiveError::Malformed {
            detail: format!("{total} cells exceeds the limit of {MAX_CELLS}"),
        });
    }

    // Cap the up-front reservation; a lying header fails on truncation.
    let mut cells = Vec::with_capacity(total.min(1 << 20) as usize);
    for i in 0..total {
        let flags = read_u8(r, "cell flags")?;
        if flags & !KNOWN_FLAGS != 0 {
            return Err(ArchiveError::Malformed {
                detail: format!("unknown flag bits {flags:#04x} in cell {i}"),
            });
        }
        let count = read_u32_le(r, "cell count")?;
        let parent = if flags & FLAG_HAS_PARENT != 0 {
            let x = read_i32_le(r, "parent x")?;
            let y = read_i32_le(r, "parent y")?;
            Some(Point::new(x, y))
        } else {
            None
        };
        cells.push(Cell {
            broken: flags & FLAG_BROKEN != 0,
            insulated: flags & FLAG_INSULATED != 0,
            count,
            parent,
        });
    }

    let recorded = read_u64_le(r, "trailer hash")?;
    let computed = cells_hash(width, height, &cells);
    if recorded != computed {
        return Err(ArchiveError::ChecksumMismatch { recorded, computed });
    }

    let mut extra = [0u8; 1];
    if r.read(&mut extra)? != 0 {
        return Err(ArchiveError::Malformed {
            detail: "trailing bytes after trailer".to_string(),
        });
    }

    Ok(CellGrid::from_cells(w, h, cells)?)
}
