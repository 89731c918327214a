//! Error types for lattice model construction.

use thiserror::Error;

/// Errors detected while validating a [`LatticeSpec`](crate::LatticeSpec).
///
/// All of these are configuration errors: they are reported once by
/// [`LatticeModel::new`](crate::LatticeModel::new) and never occur
/// mid-simulation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LatticeError {
    /// Spatial dimensionality outside `1..=3`.
    #[error("lattice dimension must be 1, 2 or 3, got {dim}")]
    InvalidDimension {
        /// The rejected dimensionality.
        dim: usize,
    },
    /// Speed count is zero or even (a rest direction plus mirrored pairs is always odd).
    #[error("lattice speed count must be odd and non-zero, got {speeds}")]
    InvalidSpeedCount {
        /// The rejected speed count.
        speeds: usize,
    },
    /// `SPEEDS + PAD` does not split into two halves of at least `HSPEED` slots.
    #[error("padding {pad} cannot hold two halves of {hspeed} slots (ND = {nd})")]
    InvalidPadding {
        /// Configured padding.
        pad: usize,
        /// Size of one half, `(SPEEDS + 1) / 2`.
        hspeed: usize,
        /// Resulting slot count per node.
        nd: usize,
    },
    /// A velocity or weight table has the wrong length.
    #[error("table {table} has {found} entries, expected {expected}")]
    TableLength {
        /// Which table (`velocities` or `weights`).
        table: &'static str,
        /// Required length (`ND`).
        expected: usize,
        /// Supplied length.
        found: usize,
    },
    /// The rest slot or a padding slot carries a non-zero velocity.
    #[error("slot {slot} must have zero velocity")]
    NonZeroRest {
        /// Offending slot.
        slot: usize,
    },
    /// A padding slot carries a non-zero weight.
    #[error("padding slot {slot} must have zero weight, got {weight}")]
    PaddingWeight {
        /// Offending slot.
        slot: usize,
        /// The weight found there.
        weight: f64,
    },
    /// A moving direction of the positive half has no exact negation in the negative half.
    #[error("slot {slot} is not mirrored by slot {mirror}")]
    Asymmetric {
        /// Slot in the positive half.
        slot: usize,
        /// Expected mirror slot in the negative half.
        mirror: usize,
    },
    /// A moving direction has zero velocity (it would duplicate the rest direction).
    #[error("slot {slot} must have a non-zero velocity")]
    ZeroVelocity {
        /// Offending slot.
        slot: usize,
    },
    /// A velocity component beyond the lattice dimension is non-zero.
    #[error("slot {slot} has a non-zero component on inactive axis {axis}")]
    InactiveAxis {
        /// Offending slot.
        slot: usize,
        /// Axis index (`0 = x`, `1 = y`, `2 = z`).
        axis: usize,
    },
    /// A velocity component reaches beyond the nearest neighbour.
    ///
    /// Streaming only resolves the three candidate coordinates
    /// `x - 1, x, x + 1` per axis.
    #[error("slot {slot} has component {component} on axis {axis}, outside -1..=1")]
    VelocityOutOfHalo {
        /// Offending slot.
        slot: usize,
        /// Axis index.
        axis: usize,
        /// The component found there.
        component: i32,
    },
    /// Velocity components do not sum to zero along an axis.
    #[error("velocity components along axis {axis} sum to {sum}, expected 0")]
    NonZeroMomentum {
        /// Axis index.
        axis: usize,
        /// The offending sum.
        sum: i64,
    },
    /// A weight is negative or not finite.
    #[error("slot {slot} has invalid weight {weight}")]
    InvalidWeight {
        /// Offending slot.
        slot: usize,
        /// The weight found there.
        weight: f64,
    },
    /// Weights of mirrored directions differ.
    #[error("slots {slot} and {mirror} carry different weights")]
    AsymmetricWeight {
        /// Slot in the positive half.
        slot: usize,
        /// Mirror slot in the negative half.
        mirror: usize,
    },
    /// Weights do not sum to one.
    #[error("weights sum to {sum}, expected 1")]
    WeightSum {
        /// The offending sum.
        sum: f64,
    },
    /// The second velocity moment is not isotropic.
    #[error("second moment is anisotropic: sum(w * c{a} * c{b}) = {moment}, expected {expected}")]
    Anisotropic {
        /// First axis.
        a: usize,
        /// Second axis.
        b: usize,
        /// Computed moment.
        moment: f64,
        /// Expected moment (`CS²` on the diagonal, `0` elsewhere).
        expected: f64,
    },
}
