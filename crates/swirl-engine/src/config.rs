//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the builder-input for [`Simulation::new`](crate::Simulation::new).
//! [`validate()`](SimulationConfig::validate) checks structural invariants
//! before any memory is allocated.

use std::fmt;
use std::sync::Arc;

use swirl_lattice::LatticeModel;
use swirl_population::{AddressError, StoreError};
use swirl_space::Grid;
use thiserror::Error;

use crate::collision::Collision;

// ── ExecutionMode ─────────────────────────────────────────────────

/// How a sweep distributes nodes over threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One thread, nodes in canonical order.
    Sequential,
    /// rayon data-parallel sweep.
    Parallel {
        /// Dedicated pool size. `None` uses rayon's global pool.
        threads: Option<usize>,
    },
}

impl Default for ExecutionMode {
    fn default() -> Self {
        Self::Parallel { threads: None }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel { threads: None } => write!(f, "parallel (global pool)"),
            Self::Parallel { threads: Some(n) } => write!(f, "parallel ({n} threads)"),
        }
    }
}

// ── ConfigError ───────────────────────────────────────────────────

/// Errors detected while validating a [`SimulationConfig`] or building a simulation from it.
#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    /// `populations` is zero.
    #[error("simulation needs at least one population")]
    NoPopulations,
    /// `ExecutionMode::Parallel { threads: Some(0) }`.
    #[error("parallel execution needs at least one thread")]
    ZeroThreads,
    /// The dedicated thread pool could not be built.
    #[error("thread pool: {reason}")]
    ThreadPool {
        /// Description from rayon.
        reason: String,
    },
    /// The address space could not be laid out, or failed verification.
    #[error("addressing: {0}")]
    Addressing(#[from] AddressError),
    /// The population buffer could not be allocated.
    #[error("population store: {0}")]
    Store(#[from] StoreError),
}

// ── SimulationConfig ──────────────────────────────────────────────

/// Complete configuration for constructing a [`Simulation`](crate::Simulation).
pub struct SimulationConfig {
    /// Grid extents. Periodic on every axis.
    pub grid: Grid,
    /// Velocity set shared with the collision operator.
    pub lattice: Arc<LatticeModel>,
    /// Number of populations per node (`NPOP`). Minimum: 1.
    pub populations: usize,
    /// Collision operator applied at every node.
    pub collision: Box<dyn Collision>,
    /// Sweep execution strategy. Default: parallel on the global pool.
    pub execution: ExecutionMode,
    /// Check the write bijection of both phases at construction. Default: `true`.
    pub verify_addressing: bool,
}

impl SimulationConfig {
    /// A configuration with default execution and verification settings.
    pub fn new(
        grid: Grid,
        lattice: Arc<LatticeModel>,
        populations: usize,
        collision: Box<dyn Collision>,
    ) -> Self {
        Self {
            grid,
            lattice,
            populations,
            collision,
            execution: ExecutionMode::default(),
            verify_addressing: true,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. At least one population.
        if self.populations == 0 {
            return Err(ConfigError::NoPopulations);
        }
        // 2. A dedicated pool needs at least one thread.
        if let ExecutionMode::Parallel { threads: Some(0) } = self.execution {
            return Err(ConfigError::ZeroThreads);
        }
        // 3. The buffer must be addressable.
        let layout = swirl_population::PopulationLayout {
            nodes: self.grid.node_count(),
            npop: self.populations,
            nd: self.lattice.nd(),
        };
        layout.entries()?;
        Ok(())
    }
}

impl fmt::Debug for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationConfig")
            .field("grid", &self.grid)
            .field("lattice", &self.lattice.name())
            .field("populations", &self.populations)
            .field("collision", &self.collision.name())
            .field("execution", &self.execution)
            .field("verify_addressing", &self.verify_addressing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::NoCollision;

    fn config() -> SimulationConfig {
        SimulationConfig::new(
            Grid::new(4, 4, 4).unwrap(),
            Arc::new(LatticeModel::d3q19()),
            1,
            Box::new(NoCollision),
        )
    }

    #[test]
    fn defaults() {
        let c = config();
        assert_eq!(c.execution, ExecutionMode::Parallel { threads: None });
        assert!(c.verify_addressing);
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn default_execution_is_global_pool() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Parallel { threads: None });
    }

    #[test]
    fn zero_populations_rejected() {
        let mut c = config();
        c.populations = 0;
        assert_eq!(c.validate(), Err(ConfigError::NoPopulations));
    }

    #[test]
    fn zero_threads_rejected() {
        let mut c = config();
        c.execution = ExecutionMode::Parallel { threads: Some(0) };
        assert_eq!(c.validate(), Err(ConfigError::ZeroThreads));
    }

    #[test]
    fn oversized_buffer_rejected() {
        let mut c = config();
        c.populations = usize::MAX / 8;
        assert!(matches!(c.validate(), Err(ConfigError::Store(StoreError::CapacityOverflow { .. }))));
    }

    #[test]
    fn debug_names_collision() {
        let s = format!("{:?}", config());
        assert!(s.contains("\"none\""));
        assert!(s.contains("D3Q19"));
    }

    #[test]
    fn execution_display() {
        assert_eq!(ExecutionMode::Sequential.to_string(), "sequential");
        assert_eq!(
            ExecutionMode::Parallel { threads: Some(3) }.to_string(),
            "parallel (3 threads)"
        );
    }
}
