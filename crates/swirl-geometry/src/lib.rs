//! Boundary descriptors for Swirl simulations.
//!
//! Geometry builders classify grid nodes into [`BoundaryRole`]s and emit
//! flat [`BoundaryElement`] records carrying the prescribed density and
//! velocity. What a boundary kernel does with them is up to the caller;
//! this crate only produces the lists.
//!
//! The shipped builder is [`Cylinder`]: flow past a circular obstacle in
//! a channel, optionally bounded by side walls.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod cylinder;
pub mod error;

pub use boundary::{BoundaryElement, BoundaryRole, BoundarySet};
pub use cylinder::{Cylinder, Orientation};
pub use error::GeometryError;
