//! Macroscopic fields and snapshot files for Swirl simulations.
//!
//! A [`Continuum`] holds density and velocity for every grid node. It
//! can be written to and read back from a raw binary snapshot: the
//! exact in-memory byte image of the buffer, native endianness, no
//! header, at `<dir>/<name>_<step>.bin`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod continuum;
pub mod error;
pub mod snapshot;

pub use continuum::{Continuum, COMPONENTS};
pub use error::SnapshotError;
pub use snapshot::snapshot_path;
