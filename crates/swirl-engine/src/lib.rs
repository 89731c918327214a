//! Stepping driver for Swirl simulations.
//!
//! [`Simulation`] owns the single population buffer, the step parity,
//! and the collision operator. Each [`step`](Simulation::step) sweeps
//! every node once:
//!
//! ```text
//! for each node x (sequential or rayon-parallel):
//!     gather   f[p, n, d] <- store[read_offset(parity, x, n, d, p)]
//!     collide  Collision::collide(&NodeContext, &mut f)
//!     scatter  store[write_offset(parity, x, n, d, p)] <- f[p, n, d]
//! barrier
//! parity <- !parity
//! ```
//!
//! Even steps collide in place; odd steps stream on both sides of the
//! collision. Writes within one sweep never overlap, so workers share
//! the store without locks.
//!
//! A collision failure leaves the buffer half-swept with no way back,
//! so the simulation is poisoned and refuses further steps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collision;
pub mod config;
pub mod metrics;
pub mod simulation;

pub use collision::{Collision, CollisionError, NoCollision, NodeContext};
pub use config::{ConfigError, ExecutionMode, SimulationConfig};
pub use metrics::StepMetrics;
pub use simulation::{Simulation, StepError};
