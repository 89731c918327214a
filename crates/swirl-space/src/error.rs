//! Error types for grid construction and coordinate queries.

use thiserror::Error;

/// Errors arising from grid construction or coordinate queries.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// A coordinate is outside the bounds of the grid.
    #[error("coordinate {coord:?} out of bounds: {bounds}")]
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: [u32; 3],
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// Attempted to construct a grid with zero nodes.
    #[error("grid must have at least one node")]
    EmptySpace,
    /// An axis extent exceeds the supported maximum.
    #[error("dimension {name}={value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Axis name (`nx`, `ny` or `nz`).
        name: &'static str,
        /// The rejected extent.
        value: u32,
        /// Largest accepted extent.
        max: u32,
    },
    /// `nx * ny * nz` does not fit in `usize`.
    #[error("grid {nx}x{ny}x{nz} exceeds the addressable node count")]
    NodeCountOverflow {
        /// x extent.
        nx: u32,
        /// y extent.
        ny: u32,
        /// z extent.
        nz: u32,
    },
}
