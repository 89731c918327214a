//! Discrete-velocity lattice models for Swirl simulations.
//!
//! A [`LatticeModel`] is an immutable, validated description of a
//! velocity set: directions, weights, speed of sound, and the memory
//! layout constants the AA addressing scheme indexes against.
//!
//! # Slot layout
//!
//! Each node stores `ND = SPEEDS + PAD` slots split into two halves of
//! `OFF = ND / 2` slots:
//!
//! ```text
//! slot:  0     1 .. HSPEED-1     OFF    OFF+1 .. OFF+HSPEED-1
//!        rest  positive half     pad    negative half (mirrors 1..HSPEED-1)
//! ```
//!
//! The padding slot at `OFF` has zero velocity and zero weight; the
//! AA scheme uses it as the alternate home of the rest population.
//!
//! # Presets
//!
//! - [`LatticeModel::d2q9`]
//! - [`LatticeModel::d3q15`]
//! - [`LatticeModel::d3q19`] (reference model)
//! - [`LatticeModel::d3q27`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod presets;

pub use error::LatticeError;
pub use model::{LatticeModel, LatticeSpec};
