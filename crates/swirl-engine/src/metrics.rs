//! Per-step performance metrics.

use swirl_core::{Parity, StepId};

/// Timing data for a single completed step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// The step that was swept.
    pub step: StepId,
    /// Parity the step was swept with.
    pub parity: Parity,
    /// Wall-clock time for the sweep, in microseconds.
    pub elapsed_us: u64,
    /// Nodes updated.
    pub nodes: usize,
    /// Throughput in million lattice updates per second.
    pub mlups: f64,
}

impl StepMetrics {
    /// Metrics for `nodes` updates completed in `elapsed_us` microseconds.
    ///
    /// A zero duration reports zero throughput rather than infinity.
    pub fn new(step: StepId, parity: Parity, elapsed_us: u64, nodes: usize) -> Self {
        let mlups = if elapsed_us == 0 {
            0.0
        } else {
            nodes as f64 / elapsed_us as f64
        };
        Self {
            step,
            parity,
            elapsed_us,
            nodes,
            mlups,
        }
    }
}
