//! Structured grids for Swirl simulations.
//!
//! This crate defines the [`Grid`] extents every other crate is
//! parameterised by, the canonical node ordering (z outermost, x
//! innermost) with its index/coordinate round trip, and the
//! [`Neighbourhood`] halo triples consumed by the AA address translator.
//!
//! # Edge handling
//!
//! Grids are periodic on every axis. Wall, inlet, and outlet nodes are
//! described separately by boundary element lists and handled by the
//! collision kernel, so the streaming topology itself never clamps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod neighbourhood;

pub use error::SpaceError;
pub use grid::Grid;
pub use neighbourhood::Neighbourhood;
