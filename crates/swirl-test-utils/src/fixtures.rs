//! Reusable collision operator fixtures.
//!
//! - [`CountingCollision`]: identity, counts node visits.
//! - [`FailingCollision`]: fails at one node of one step.
//! - [`ScaleCollision`]: multiplies every population by a constant.
//! - [`SwapCollision`]: exchanges each direction with its opposite.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use swirl_core::StepId;
use swirl_engine::{Collision, CollisionError, NodeContext};

/// Identity operator that counts how many nodes it has collided.
///
/// The counter is shared, so it can be read after the operator has been
/// boxed into a simulation.
#[derive(Default)]
pub struct CountingCollision {
    calls: Arc<AtomicUsize>,
}

impl CountingCollision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the call counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Collision for CountingCollision {
    fn name(&self) -> &str {
        "counting"
    }

    fn collide(&self, _ctx: &NodeContext<'_>, _values: &mut [f64]) -> Result<(), CollisionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Fails when it reaches node `coord` during step `step`; identity otherwise.
pub struct FailingCollision {
    pub coord: [u32; 3],
    pub step: StepId,
}

impl FailingCollision {
    pub fn new(coord: [u32; 3], step: StepId) -> Self {
        Self { coord, step }
    }
}

impl Collision for FailingCollision {
    fn name(&self) -> &str {
        "failing"
    }

    fn collide(&self, ctx: &NodeContext<'_>, _values: &mut [f64]) -> Result<(), CollisionError> {
        if ctx.coord == self.coord && ctx.step == self.step {
            return Err(CollisionError::new(format!(
                "deliberate failure at {:?}",
                self.coord
            )));
        }
        Ok(())
    }
}

/// Multiplies every population by `factor`.
pub struct ScaleCollision {
    pub factor: f64,
}

impl Collision for ScaleCollision {
    fn name(&self) -> &str {
        "scale"
    }

    fn collide(&self, _ctx: &NodeContext<'_>, values: &mut [f64]) -> Result<(), CollisionError> {
        for v in values.iter_mut() {
            *v *= self.factor;
        }
        Ok(())
    }
}

/// Exchanges every direction with its opposite (full bounce-back at every node).
pub struct SwapCollision;

impl Collision for SwapCollision {
    fn name(&self) -> &str {
        "swap"
    }

    fn collide(&self, ctx: &NodeContext<'_>, values: &mut [f64]) -> Result<(), CollisionError> {
        let lattice = ctx.lattice;
        for p in 0..ctx.populations {
            for d in 1..lattice.hspeed() {
                values.swap(ctx.slot(p, 0, d), ctx.slot(p, 1, d));
            }
        }
        Ok(())
    }
}
