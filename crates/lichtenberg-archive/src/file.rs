//! File-level save and load.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use lichtenberg_core::CellGrid;
use log::debug;

use crate::codec::{decode_grid, encode_grid};
use crate::error::ArchiveError;

/// Write `grid` to `path`, replacing any existing file.
pub fn save(grid: &CellGrid, path: impl AsRef<Path>) -> Result<(), ArchiveError> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    encode_grid(&mut w, grid)?;
    w.flush()?;
    debug!(
        "saved {}x{} grid ({} broken) to {}",
        grid.width(),
        grid.height(),
        grid.broken_count(),
        path.display()
    );
    Ok(())
}

/// Read a grid from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<CellGrid, ArchiveError> {
    let path = path.as_ref();
    let mut r = BufReader::new(File::open(path)?);
    let grid = decode_grid(&mut r)?;
    debug!(
        "loaded {}x{} grid ({} broken) from {}",
        grid.width(),
        grid.height(),
        grid.broken_count(),
        path.display()
    );
    Ok(grid)
}

/// Save and load as methods on [`CellGrid`].
///
/// # Examples
///
/// ```no_run
/// use lichtenberg_archive::GridArchive;
/// use lichtenberg_core::CellGrid;
///
/// let mut grid = CellGrid::new(8, 8)?;
/// grid.mark_broken(4, 0, None, 0)?;
/// grid.save("figure.lcht")?;
///
/// let mut restored = CellGrid::default();
/// restored.load("figure.lcht")?;
/// assert_eq!(restored, grid);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait GridArchive {
    /// Write this grid to `path`.
    fn save(&self, path: impl AsRef<Path>) -> Result<(), ArchiveError>;

    /// Replace this grid with the one stored at `path`.
    ///
    /// On error `self` is left unchanged.
    fn load(&mut self, path: impl AsRef<Path>) -> Result<(), ArchiveError>;
}

impl GridArchive for CellGrid {
    fn save(&self, path: impl AsRef<Path>) -> Result<(), ArchiveError> {
        save(self, path)
    }

    fn load(&mut self, path: impl AsRef<Path>) -> Result<(), ArchiveError> {
        *self = load(path)?;
        Ok(())
    }
}
