//! Swirl: a lattice-Boltzmann solver core with single-buffer AA-pattern streaming.
//!
//! This is the facade crate that re-exports the public API of every Swirl
//! sub-crate. Depending on `swirl` alone is enough for most users.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use swirl::prelude::*;
//!
//! // Channel with a cylinder obstacle, flow along x.
//! let grid = Grid::new(24, 12, 1).unwrap();
//! let cylinder = Cylinder {
//!     radius: 2,
//!     centre: [6, 6, 0],
//!     orientation: Orientation::X,
//!     side_walls: true,
//! };
//! let boundaries = cylinder.build(&grid, 1.0, [0.05, 0.0, 0.0]).unwrap();
//! assert!(boundaries.count(BoundaryRole::Wall) > 0);
//!
//! // Fluid at rest, streamed for a few steps.
//! let lattice = Arc::new(LatticeModel::d2q9());
//! let config = SimulationConfig::new(grid, Arc::clone(&lattice), 1, Box::new(NoCollision));
//! let mut sim = Simulation::new(config).unwrap();
//! sim.initialize(|s| lattice.weight(lattice.slot(s.n, s.d)));
//! let metrics = sim.run(4).unwrap();
//! assert_eq!(metrics.step, StepId(3));
//! assert_eq!(sim.parity(), Parity::Even);
//!
//! let mut field = Continuum::new(grid).unwrap();
//! sim.macroscopic(&mut field).unwrap();
//! assert!((field.total_density() - 288.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `swirl-core` | Step ids, node indices, parity |
//! | [`lattice`] | `swirl-lattice` | Velocity sets and presets |
//! | [`space`] | `swirl-space` | Periodic grids and neighbourhoods |
//! | [`population`] | `swirl-population` | Population buffer and AA address translation |
//! | [`geometry`] | `swirl-geometry` | Boundary sets and the cylinder scenario |
//! | [`continuum`] | `swirl-continuum` | Macroscopic fields and binary snapshots |
//! | [`engine`] | `swirl-engine` | Collision seam and the stepping driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Step ids, node indices and AA parity (`swirl-core`).
pub use swirl_core as types;

/// Velocity sets (`swirl-lattice`).
///
/// [`lattice::LatticeModel`] with the D2Q9, D3Q15, D3Q19 and D3Q27 presets.
pub use swirl_lattice as lattice;

/// Periodic Cartesian grids (`swirl-space`).
pub use swirl_space as space;

/// Population storage and addressing (`swirl-population`).
///
/// [`population::AddressTranslator`] maps `(node, p, n, d)` to offsets in
/// the single [`population::PopulationStore`] buffer for either parity.
pub use swirl_population as population;

/// Boundary descriptors (`swirl-geometry`).
pub use swirl_geometry as geometry;

/// Macroscopic fields and snapshot files (`swirl-continuum`).
pub use swirl_continuum as continuum;

/// Stepping driver (`swirl-engine`).
///
/// Implement [`engine::Collision`] to plug in physics; drive it with
/// [`engine::Simulation`].
pub use swirl_engine as engine;

/// Common imports for typical Swirl usage.
///
/// ```rust
/// use swirl::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use swirl_core::{NodeIndex, Parity, StepId};

    // Lattice and space
    pub use swirl_lattice::LatticeModel;
    pub use swirl_space::Grid;

    // Addressing
    pub use swirl_population::{AddressTranslator, SlotCoord};

    // Geometry
    pub use swirl_geometry::{BoundaryElement, BoundaryRole, BoundarySet, Cylinder, Orientation};

    // Continuum
    pub use swirl_continuum::Continuum;

    // Engine
    pub use swirl_engine::{
        Collision, CollisionError, ExecutionMode, NoCollision, NodeContext, Simulation,
        SimulationConfig, StepMetrics,
    };

    // Errors
    pub use swirl_continuum::SnapshotError;
    pub use swirl_engine::{ConfigError, StepError};
    pub use swirl_geometry::GeometryError;
    pub use swirl_population::AddressError;
    pub use swirl_space::SpaceError;
}
