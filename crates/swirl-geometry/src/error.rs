//! Geometry construction errors.

use thiserror::Error;

/// Errors from building or rasterising boundary descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Orientation name other than `x`, `y` or `z`.
    #[error("unknown geometry orientation {name:?}, expected \"x\", \"y\" or \"z\"")]
    UnknownOrientation {
        /// The rejected name.
        name: String,
    },
    /// The obstacle centre lies outside the grid.
    #[error("centre {centre:?} outside grid {dims:?}")]
    CentreOutOfBounds {
        /// Requested centre.
        centre: [u32; 3],
        /// Grid extents.
        dims: [u32; 3],
    },
    /// A boundary element refers to a node outside the grid.
    #[error("boundary element at {coord:?} outside grid {dims:?}")]
    ElementOutOfBounds {
        /// The element's node.
        coord: [u32; 3],
        /// Grid extents.
        dims: [u32; 3],
    },
}
