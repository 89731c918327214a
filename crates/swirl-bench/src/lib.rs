//! Benchmark profiles for the Swirl lattice-Boltzmann workspace.
//!
//! - [`reference_profile`]: D3Q19 on a periodic 64³ grid (262K nodes)
//! - [`planar_profile`]: D2Q9 on a periodic 512² grid

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use swirl_engine::{ExecutionMode, NoCollision, SimulationConfig};
use swirl_lattice::LatticeModel;
use swirl_space::{Grid, SpaceError};

/// D3Q19, 64×64×64, one population, identity collision.
///
/// Address verification is off so setup time stays out of the way.
pub fn reference_profile(execution: ExecutionMode) -> Result<SimulationConfig, SpaceError> {
    profile(LatticeModel::d3q19(), Grid::new(64, 64, 64)?, execution)
}

/// D2Q9, 512×512, one population, identity collision.
pub fn planar_profile(execution: ExecutionMode) -> Result<SimulationConfig, SpaceError> {
    profile(LatticeModel::d2q9(), Grid::new(512, 512, 1)?, execution)
}

fn profile(
    lattice: LatticeModel,
    grid: Grid,
    execution: ExecutionMode,
) -> Result<SimulationConfig, SpaceError> {
    let mut config = SimulationConfig::new(grid, Arc::new(lattice), 1, Box::new(NoCollision));
    config.execution = execution;
    config.verify_addressing = false;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        for config in [
            reference_profile(ExecutionMode::Sequential).unwrap(),
            planar_profile(ExecutionMode::Parallel { threads: None }).unwrap(),
        ] {
            assert_eq!(config.validate(), Ok(()));
            assert!(!config.verify_addressing);
        }
    }

    #[test]
    fn reference_profile_shape() {
        let config = reference_profile(ExecutionMode::Sequential).unwrap();
        assert_eq!(config.grid.node_count(), 262_144);
        assert_eq!(config.lattice.name(), "D3Q19");
    }
}
