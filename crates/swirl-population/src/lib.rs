//! In-place population storage for Swirl simulations.
//!
//! The AA access pattern keeps exactly one copy of every distribution
//! value. Each time step reads and writes the same buffer; which slot a
//! given population lives in depends on the step [`Parity`](swirl_core::Parity).
//!
//! # Architecture
//!
//! ```text
//! AddressTranslator (grid, Arc<LatticeModel>, npop)
//! ├── linearize / delinearize      slot coordinate <-> Offset
//! ├── read_offset / write_offset   parity-dependent AA addressing
//! └── layout() ──> PopulationStore::allocate
//!                  └── Box<[CacheLine]> (64-byte aligned AtomicU64 cells)
//! ```
//!
//! Buffer positions are only reachable through [`Offset`] values, and
//! only the translator mints them, so every access goes through the
//! addressing rules.
//!
//! # Concurrency
//!
//! Cells are relaxed atomics holding `f64` bits. A sweep shares
//! `&PopulationStore` between worker threads; the write bijection of a
//! phase guarantees no two workers touch the same cell, and the end of
//! the sweep is the barrier before the next phase.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod store;
pub mod translator;

pub use error::{AddressError, StoreError};
pub use store::{Offset, PopulationLayout, PopulationStore};
pub use translator::{AddressTranslator, SlotCoord};
