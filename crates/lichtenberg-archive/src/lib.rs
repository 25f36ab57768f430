//! Persistent storage for grown Lichtenberg grids.
//!
//! A grid is saved independently of any tree built over it, so rendering
//! can happen in a later process. The archive format is a small custom
//! binary codec with an FNV-1a trailer; loading a saved grid reproduces a
//! value equal to the original.
//!
//! # Architecture
//!
//! - [`encode_grid`] / [`decode_grid`] work on any `Write` / `Read`
//! - [`save`] / [`load`] wrap them for files
//! - [`GridArchive`] exposes the same as methods on `CellGrid`
//! - [`grid_hash`] fingerprints a grid for determinism checks
//!
//! # Format
//!
//! ```text
//! [MAGIC "LCHT"] [VERSION u8] [width u32] [height u32]
//! [Cell 1] [Cell 2] ... [Cell width*height]
//! [grid_hash u64]
//! ```
//!
//! Each cell is a flags byte (`1` broken, `2` insulated, `4` has parent),
//! its `count` as `u32`, and the parent coordinate as two `i32` when the
//! parent flag is set.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod file;
pub mod hash;

pub use codec::{decode_grid, encode_grid};
pub use error::ArchiveError;
pub use file::{load, save, GridArchive};
pub use hash::grid_hash;

/// Magic bytes at the start of every archive.
pub const MAGIC: [u8; 4] = *b"LCHT";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
