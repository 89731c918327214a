//! The stepping driver.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use smallvec::SmallVec;
use swirl_continuum::{Continuum, COMPONENTS};
use swirl_core::{NodeIndex, Parity, StepId};
use swirl_lattice::LatticeModel;
use swirl_population::{AddressError, AddressTranslator, PopulationStore, SlotCoord};
use swirl_space::Grid;
use thiserror::Error;

use crate::collision::{Collision, CollisionError, NodeContext};
use crate::config::{ConfigError, ExecutionMode, SimulationConfig};
use crate::metrics::StepMetrics;

/// Per-node scratch large enough for one population of the 27-velocity set.
type NodeValues = SmallVec<[f64; 32]>;

/// Errors from stepping or sampling a [`Simulation`].
#[derive(Debug, PartialEq, Error)]
pub enum StepError {
    /// The collision operator failed; the simulation is now poisoned.
    #[error("collision {operator:?} failed at node {coord:?} in step {step}: {source}")]
    CollisionFailed {
        /// Operator name.
        operator: String,
        /// Node being collided.
        coord: [u32; 3],
        /// Step being swept.
        step: StepId,
        /// The operator's error.
        #[source]
        source: CollisionError,
    },
    /// An earlier step failed part-way; the buffer is no longer consistent.
    #[error("simulation poisoned by a failed sweep at step {step}")]
    Poisoned {
        /// The step that failed.
        step: StepId,
    },
    /// A macroscopic field for another grid was passed in.
    #[error("field grid {found:?} does not match simulation grid {expected:?}")]
    GridMismatch {
        /// Simulation grid extents.
        expected: [u32; 3],
        /// Field grid extents.
        found: [u32; 3],
    },
}

/// An AA-pattern lattice-Boltzmann simulation.
///
/// Owns the population buffer and the step parity. Populations are
/// addressed by direction `(n, d)`: [`initialize`](Self::initialize)
/// and [`population`](Self::population) always see the pre-collision
/// value of the next step, wherever the current parity keeps it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use swirl_engine::{ExecutionMode, NoCollision, Simulation, SimulationConfig};
/// use swirl_lattice::LatticeModel;
/// use swirl_space::Grid;
///
/// let lattice = Arc::new(LatticeModel::d2q9());
/// let mut config = SimulationConfig::new(
///     Grid::new(8, 8, 1).unwrap(),
///     Arc::clone(&lattice),
///     1,
///     Box::new(NoCollision),
/// );
/// config.execution = ExecutionMode::Sequential;
/// let mut sim = Simulation::new(config).unwrap();
///
/// // A single particle moving along +x.
/// sim.initialize(|s| if (s.x, s.y, s.n, s.d) == (2, 3, 0, 1) { 1.0 } else { 0.0 });
/// sim.step().unwrap();
/// sim.step().unwrap();
/// assert_eq!(sim.population(4, 3, 0, 0, 0, 1).unwrap(), 1.0);
/// ```
pub struct Simulation {
    translator: AddressTranslator,
    store: PopulationStore,
    collision: Box<dyn Collision>,
    execution: ExecutionMode,
    pool: Option<rayon::ThreadPool>,
    directions: Box<[(usize, usize)]>,
    parity: Parity,
    step: StepId,
    poisoned: Option<StepId>,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Validate `config`, allocate the population buffer, and optionally
    /// verify the write bijection of both phases.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let translator =
            AddressTranslator::new(config.grid, Arc::clone(&config.lattice), config.populations)?;
        if config.verify_addressing {
            translator.check_write_exclusivity(Parity::Even)?;
            translator.check_write_exclusivity(Parity::Odd)?;
        }
        let store = PopulationStore::allocate(translator.layout())?;

        let pool = match config.execution {
            ExecutionMode::Parallel {
                threads: Some(threads),
            } => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| ConfigError::ThreadPool {
                        reason: e.to_string(),
                    })?,
            ),
            _ => None,
        };

        let dims = config.grid.dims();
        tracing::info!(
            "simulation ready: grid {}x{}x{}, lattice {}, {} population(s), collision {:?}, {}, {} bytes",
            dims[0],
            dims[1],
            dims[2],
            config.lattice.name(),
            config.populations,
            config.collision.name(),
            config.execution,
            store.memory_bytes()
        );

        Ok(Self {
            directions: config.lattice.directions().collect(),
            translator,
            store,
            collision: config.collision,
            execution: config.execution,
            pool,
            parity: Parity::Even,
            step: StepId(0),
            poisoned: None,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Sweep every node once with the current parity, then flip it.
    ///
    /// On a collision failure the step counter and parity stay where they
    /// were, the simulation is poisoned, and every later call returns
    /// `Err(StepError::Poisoned)`.
    pub fn step(&mut self) -> Result<StepMetrics, StepError> {
        if let Some(step) = self.poisoned {
            return Err(StepError::Poisoned { step });
        }

        let start = Instant::now();
        let sweep = Sweep {
            translator: &self.translator,
            store: &self.store,
            collision: self.collision.as_ref(),
            directions: &self.directions,
            parity: self.parity,
            step: self.step,
        };
        let nodes = self.translator.grid().node_count();
        let result = match self.execution {
            ExecutionMode::Sequential => (0..nodes).try_for_each(|i| sweep.update(NodeIndex(i))),
            ExecutionMode::Parallel { .. } => {
                let run = || {
                    (0..nodes)
                        .into_par_iter()
                        .try_for_each(|i| sweep.update(NodeIndex(i)))
                };
                match &self.pool {
                    Some(pool) => pool.install(run),
                    None => run(),
                }
            }
        };

        if let Err(e) = result {
            tracing::warn!("step {} failed, simulation poisoned: {}", self.step, e);
            self.poisoned = Some(self.step);
            return Err(e);
        }

        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        let metrics = StepMetrics::new(self.step, self.parity, elapsed_us, nodes);
        tracing::debug!(
            "step {} ({}) done in {} us, {:.2} MLUPS",
            metrics.step,
            metrics.parity,
            metrics.elapsed_us,
            metrics.mlups
        );

        self.parity = self.parity.flip();
        self.step = self.step.next();
        self.last_metrics = metrics;
        Ok(metrics)
    }

    /// Run `steps` consecutive steps, stopping at the first failure.
    pub fn run(&mut self, steps: u64) -> Result<StepMetrics, StepError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(self.last_metrics)
    }

    /// Set every physical population from `value`.
    ///
    /// Values are stored where the next step will read them, so this is
    /// valid at any parity.
    pub fn initialize(&mut self, mut value: impl FnMut(SlotCoord) -> f64) {
        let grid = *self.translator.grid();
        for [x, y, z] in grid.iter_nodes() {
            let nb = grid.neighbourhood(x, y, z);
            for p in 0..self.translator.npop() {
                for &(n, d) in self.directions.iter() {
                    let offset = self.translator.read_offset(self.parity, &nb, n, d, p);
                    self.store.store(offset, value(SlotCoord { x, y, z, p, n, d }));
                }
            }
        }
    }

    /// Pre-collision value of direction `(n, d)` of population `p` at node `(x, y, z)`.
    ///
    /// Returns an [`AddressError`] for coordinates outside the grid, an
    /// unknown population, or a slot that is not a physical direction.
    pub fn population(
        &self,
        x: u32,
        y: u32,
        z: u32,
        p: usize,
        n: usize,
        d: usize,
    ) -> Result<f64, AddressError> {
        self.translator.try_linearize(x, y, z, n, d, p)?;
        let lattice = self.translator.lattice();
        if d >= lattice.hspeed() || lattice.is_padding(lattice.slot(n, d)) {
            return Err(AddressError::SlotOutOfRange {
                n,
                d,
                off: lattice.off(),
            });
        }
        let nb = self.translator.grid().neighbourhood(x, y, z);
        Ok(self
            .store
            .load(self.translator.read_offset(self.parity, &nb, n, d, p)))
    }

    /// Density and velocity of population 0 at every node, from the
    /// pre-collision values of the next step.
    ///
    /// `rho = Σ f`, `u = Σ f·c / rho`; nodes with zero density get zero velocity.
    pub fn macroscopic(&self, field: &mut Continuum) -> Result<(), StepError> {
        let grid = self.translator.grid();
        if field.grid() != grid {
            return Err(StepError::GridMismatch {
                expected: grid.dims(),
                found: field.grid().dims(),
            });
        }
        let moments = |(i, node): (usize, &mut [f64])| {
            let nb = grid.neighbourhood_of(NodeIndex(i));
            let lattice = self.translator.lattice();
            let (mut rho, mut j) = (0.0, [0.0; 3]);
            for &(n, d) in self.directions.iter() {
                let f = self
                    .store
                    .load(self.translator.read_offset(self.parity, &nb, n, d, 0));
                let c = lattice.velocity(lattice.slot(n, d));
                rho += f;
                for (jk, ck) in j.iter_mut().zip(c) {
                    *jk += f * f64::from(ck);
                }
            }
            let inv = if rho == 0.0 { 0.0 } else { 1.0 / rho };
            node.copy_from_slice(&[rho, j[0] * inv, j[1] * inv, j[2] * inv]);
        };
        let values = field.as_mut_slice();
        match self.execution {
            ExecutionMode::Sequential => values.chunks_mut(COMPONENTS).enumerate().for_each(moments),
            ExecutionMode::Parallel { .. } => {
                let mut run = || values.par_chunks_mut(COMPONENTS).enumerate().for_each(moments);
                match &self.pool {
                    Some(pool) => pool.install(run),
                    None => run(),
                }
            }
        }
        Ok(())
    }

    /// Parity of the next step.
    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// Number of completed steps.
    pub fn current_step(&self) -> StepId {
        self.step
    }

    /// `true` once a sweep has failed.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    /// Metrics of the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The simulation grid.
    pub fn grid(&self) -> &Grid {
        self.translator.grid()
    }

    /// The lattice model.
    pub fn lattice(&self) -> &Arc<LatticeModel> {
        self.translator.lattice()
    }

    /// The address translator.
    pub fn translator(&self) -> &AddressTranslator {
        &self.translator
    }

    /// Read-only access to the raw population buffer.
    pub fn store(&self) -> &PopulationStore {
        &self.store
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("grid", self.translator.grid())
            .field("lattice", &self.translator.lattice().name())
            .field("populations", &self.translator.npop())
            .field("collision", &self.collision.name())
            .field("execution", &self.execution)
            .field("parity", &self.parity)
            .field("step", &self.step)
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

/// Everything one sweep needs, borrowed for its duration.
struct Sweep<'a> {
    translator: &'a AddressTranslator,
    store: &'a PopulationStore,
    collision: &'a dyn Collision,
    directions: &'a [(usize, usize)],
    parity: Parity,
    step: StepId,
}

impl Sweep<'_> {
    /// Gather, collide, and scatter one node.
    fn update(&self, index: NodeIndex) -> Result<(), StepError> {
        let tr = self.translator;
        let lattice = tr.lattice();
        let nd = lattice.nd();
        let npop = tr.npop();
        let nb = tr.grid().neighbourhood_of(index);

        let mut values: NodeValues = smallvec::smallvec![0.0; npop * nd];
        for p in 0..npop {
            for &(n, d) in self.directions {
                values[p * nd + lattice.slot(n, d)] =
                    self.store.load(tr.read_offset(self.parity, &nb, n, d, p));
            }
        }

        let ctx = NodeContext {
            coord: nb.centre(),
            index,
            parity: self.parity,
            step: self.step,
            lattice,
            populations: npop,
        };
        self.collision
            .collide(&ctx, &mut values)
            .map_err(|source| StepError::CollisionFailed {
                operator: self.collision.name().to_string(),
                coord: ctx.coord,
                step: self.step,
                source,
            })?;

        for p in 0..npop {
            for &(n, d) in self.directions {
                self.store.store(
                    tr.write_offset(self.parity, &nb, n, d, p),
                    values[p * nd + lattice.slot(n, d)],
                );
            }
        }
        Ok(())
    }
}
