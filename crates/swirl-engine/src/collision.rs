//! The [`Collision`] seam between the stepping driver and the physics.

use swirl_core::{NodeIndex, Parity, StepId};
use swirl_lattice::LatticeModel;
use thiserror::Error;

/// Per-node information handed to [`Collision::collide`].
#[derive(Clone, Copy, Debug)]
pub struct NodeContext<'a> {
    /// Node coordinates `[x, y, z]`.
    pub coord: [u32; 3],
    /// Flat node index in canonical order.
    pub index: NodeIndex,
    /// Parity of the step being swept.
    pub parity: Parity,
    /// Step being swept.
    pub step: StepId,
    /// Lattice model, for velocities and weights.
    pub lattice: &'a LatticeModel,
    /// Number of populations in the value slice.
    pub populations: usize,
}

impl NodeContext<'_> {
    /// Index of direction `(n, d)` of population `p` in the value slice:
    /// `p·ND + n·OFF + d`.
    #[inline]
    pub fn slot(&self, p: usize, n: usize, d: usize) -> usize {
        p * self.lattice.nd() + self.lattice.slot(n, d)
    }
}

/// Failure reported by a collision operator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct CollisionError {
    /// Human-readable description.
    pub reason: String,
}

impl CollisionError {
    /// A collision error with the given description.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A local collision operator.
///
/// # Contract
///
/// - `values` holds the node's pre-collision populations, `NPOP · ND`
///   entries laid out as `p·ND + n·OFF + d` (see [`NodeContext::slot`]).
///   Padding entries are zero and are not written back.
/// - The operator overwrites `values` with the post-collision state.
/// - `&self`: nodes are swept concurrently, so per-node state must not
///   live in the operator.
///
/// # Examples
///
/// ```
/// use swirl_engine::{Collision, CollisionError, NodeContext};
///
/// /// Scales every population by a constant factor.
/// struct Damp(f64);
///
/// impl Collision for Damp {
///     fn name(&self) -> &str { "damp" }
///
///     fn collide(&self, _ctx: &NodeContext<'_>, values: &mut [f64]) -> Result<(), CollisionError> {
///         values.iter_mut().for_each(|v| *v *= self.0);
///         Ok(())
///     }
/// }
///
/// assert_eq!(Damp(0.5).name(), "damp");
/// ```
pub trait Collision: Send + Sync + 'static {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Replace the pre-collision `values` of one node with post-collision ones.
    fn collide(&self, ctx: &NodeContext<'_>, values: &mut [f64]) -> Result<(), CollisionError>;
}

/// Identity operator: populations pass through unchanged, so a step is pure streaming.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCollision;

impl Collision for NoCollision {
    fn name(&self) -> &str {
        "none"
    }

    fn collide(&self, _ctx: &NodeContext<'_>, _values: &mut [f64]) -> Result<(), CollisionError> {
        Ok(())
    }
}
