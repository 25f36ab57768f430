//! Error types for the archive format.

use std::fmt;
use std::io;

use lichtenberg_core::GrowthError;

/// Errors that can occur while saving or loading a grid.
#[derive(Debug)]
pub enum ArchiveError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The data does not start with the expected `b"LCHT"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the data.
        found: u8,
    },
    /// The data is truncated or carries values the format does not allow.
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The trailer hash does not match the decoded cells.
    ChecksumMismatch {
        /// Hash stored in the trailer.
        recorded: u64,
        /// Hash computed from the decoded cells.
        computed: u64,
    },
    /// The decoded cells violate a grid invariant.
    Grid(GrowthError),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"LCHT\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::Malformed { detail } => write!(f, "malformed archive: {detail}"),
            Self::ChecksumMismatch { recorded, computed } => {
                write!(
                    f,
                    "checksum mismatch: recorded={recorded:#018x}, computed={computed:#018x}"
                )
            }
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchiveError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<GrowthError> for ArchiveError {
    fn from(e: GrowthError) -> Self {
        Self::Grid(e)
    }
}
