//! Test utilities and mock types for Swirl development.
//!
//! Provides a [`TestSimulation`] builder for small periodic scenarios,
//! seeded random population tables, and mock collision operators in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use swirl_engine::{Collision, ExecutionMode, NoCollision, Simulation, SimulationConfig};
use swirl_lattice::LatticeModel;
use swirl_population::SlotCoord;
use swirl_space::Grid;

/// Builder for small test simulations.
///
/// Defaults: D3Q19 on a periodic 4×4×4 grid, one population, identity
/// collision, sequential sweeps, addressing verification on.
pub struct TestSimulation {
    lattice: LatticeModel,
    dims: [u32; 3],
    populations: usize,
    collision: Box<dyn Collision>,
    execution: ExecutionMode,
}

impl TestSimulation {
    pub fn new() -> Self {
        Self {
            lattice: LatticeModel::d3q19(),
            dims: [4, 4, 4],
            populations: 1,
            collision: Box::new(NoCollision),
            execution: ExecutionMode::Sequential,
        }
    }

    pub fn lattice(mut self, lattice: LatticeModel) -> Self {
        self.lattice = lattice;
        self
    }

    pub fn dims(mut self, nx: u32, ny: u32, nz: u32) -> Self {
        self.dims = [nx, ny, nz];
        self
    }

    pub fn populations(mut self, populations: usize) -> Self {
        self.populations = populations;
        self
    }

    pub fn collision(mut self, collision: impl Collision) -> Self {
        self.collision = Box::new(collision);
        self
    }

    pub fn execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// The grid the simulation will be built on.
    ///
    /// # Panics
    ///
    /// Panics if the configured extents are not a valid grid.
    pub fn grid(&self) -> Grid {
        Grid::new(self.dims[0], self.dims[1], self.dims[2]).expect("test grid extents")
    }

    /// Build the simulation.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is rejected.
    pub fn build(self) -> Simulation {
        let grid = self.grid();
        let mut config = SimulationConfig::new(
            grid,
            Arc::new(self.lattice),
            self.populations,
            self.collision,
        );
        config.execution = self.execution;
        Simulation::new(config).expect("test simulation config")
    }
}

impl Default for TestSimulation {
    fn default() -> Self {
        Self::new()
    }
}

/// Seeded random value for every physical population of a grid.
///
/// Values are drawn in canonical order (node, population, direction) from
/// a `ChaCha8Rng`, so the same seed always gives the same table.
#[derive(Clone, Debug)]
pub struct PopulationTable {
    values: HashMap<SlotCoord, f64>,
}

impl PopulationTable {
    pub fn random(grid: &Grid, lattice: &LatticeModel, populations: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut values = HashMap::new();
        for [x, y, z] in grid.iter_nodes() {
            for p in 0..populations {
                for (n, d) in lattice.directions() {
                    values.insert(SlotCoord { x, y, z, p, n, d }, rng.gen_range(0.01..1.0));
                }
            }
        }
        Self { values }
    }

    /// Value at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is not a physical population of the table's grid.
    pub fn get(&self, coord: SlotCoord) -> f64 {
        self.values[&coord]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all entries.
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }
}

/// The rest-state populations `w_i · rho`, uniform in space.
pub fn uniform_rest(lattice: &LatticeModel, density: f64) -> impl Fn(SlotCoord) -> f64 + '_ {
    move |s| lattice.weight(lattice.slot(s.n, s.d)) * density
}
