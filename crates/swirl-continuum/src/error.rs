//! Snapshot errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from allocating, exporting, or importing a [`Continuum`](crate::Continuum).
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot file does not exist.
    #[error("snapshot {} not found", path.display())]
    Missing {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// The snapshot file does not hold exactly one field image.
    #[error("snapshot {} holds {found} bytes, expected {expected}", path.display())]
    SizeMismatch {
        /// Offending file.
        path: PathBuf,
        /// Byte size of the in-memory field.
        expected: usize,
        /// Byte size of the file.
        found: usize,
    },
    /// Any other filesystem failure.
    #[error("snapshot I/O on {}: {source}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The field for this grid would not fit in memory.
    #[error("macroscopic field for {nodes} nodes overflows usize")]
    CapacityOverflow {
        /// Grid node count.
        nodes: usize,
    },
}
