//! Core types for the Swirl lattice-Boltzmann workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the time-step [`Parity`] that drives the AA access pattern, the
//! branchless [`blend`] used by every address computation, and the
//! identifiers shared by the storage, geometry, and engine crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod parity;

pub use id::{NodeIndex, StepId};
pub use parity::{blend, Parity};
