//! The [`LatticeModel`] value object and its construction-time validation.

use crate::error::LatticeError;

/// Absolute tolerance for weight normalisation and moment checks.
const TOLERANCE: f64 = 1e-12;

/// Builder input for a [`LatticeModel`].
///
/// Tables are indexed by slot and must have `speeds + pad` entries,
/// laid out as described in the [crate-level docs](crate): rest slot,
/// positive half, padding slot, negative half.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeSpec {
    /// Display name, e.g. `"D3Q19"`.
    pub name: String,
    /// Spatial dimensionality (`1..=3`).
    pub dim: usize,
    /// Number of physical velocity directions, including rest.
    pub speeds: usize,
    /// Unused slots appended per node for alignment.
    pub pad: usize,
    /// Discrete velocity `(cx, cy, cz)` per slot.
    pub velocities: Vec<[i32; 3]>,
    /// Quadrature weight per slot.
    pub weights: Vec<f64>,
}

/// Immutable description of a discrete-velocity set.
///
/// Constructed once, validated at construction, then shared by
/// reference (usually behind an `Arc`) with the address translator and
/// any collision or boundary kernel that needs direction/weight data.
///
/// # Examples
///
/// ```
/// use swirl_lattice::LatticeModel;
///
/// let lattice = LatticeModel::d3q19();
/// assert_eq!(lattice.speeds(), 19);
/// assert_eq!(lattice.nd(), 20);
/// assert_eq!(lattice.off(), 10);
/// assert!((lattice.cs() - 1.0 / 3f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeModel {
    name: String,
    dim: usize,
    speeds: usize,
    pad: usize,
    hspeed: usize,
    nd: usize,
    off: usize,
    velocities: Box<[[i32; 3]]>,
    weights: Box<[f64]>,
    cs: f64,
}

impl LatticeModel {
    /// Validate `spec` and build the model.
    ///
    /// Returns the first [`LatticeError`] found; see its variants for the
    /// full list of checks.
    pub fn new(spec: LatticeSpec) -> Result<Self, LatticeError> {
        validate(&spec)?;
        Ok(Self::assemble(spec))
    }

    /// Build a model from a spec that is already known to be valid.
    pub(crate) fn assemble(spec: LatticeSpec) -> Self {
        let hspeed = (spec.speeds + 1) / 2;
        let nd = spec.speeds + spec.pad;
        let cs2: f64 = spec
            .velocities
            .iter()
            .zip(&spec.weights)
            .map(|(c, w)| w * f64::from(c[0] * c[0]))
            .sum();
        Self {
            name: spec.name,
            dim: spec.dim,
            speeds: spec.speeds,
            pad: spec.pad,
            hspeed,
            nd,
            off: nd / 2,
            velocities: spec.velocities.into_boxed_slice(),
            weights: spec.weights.into_boxed_slice(),
            cs: cs2.sqrt(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spatial dimensionality (`DIM`).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of physical directions (`SPEEDS`).
    pub fn speeds(&self) -> usize {
        self.speeds
    }

    /// Size of one half group, rest included: `(SPEEDS + 1) / 2`.
    pub fn hspeed(&self) -> usize {
        self.hspeed
    }

    /// Padding slots per node (`PAD`).
    pub fn pad(&self) -> usize {
        self.pad
    }

    /// Slots per node: `SPEEDS + PAD`.
    pub fn nd(&self) -> usize {
        self.nd
    }

    /// Offset of the negative half within a node: `ND / 2`.
    pub fn off(&self) -> usize {
        self.off
    }

    /// Lattice speed of sound, `sqrt(Σ w·cx²)`.
    pub fn cs(&self) -> f64 {
        self.cs
    }

    /// Slot index of half `n` and direction `d`: `n·OFF + d`.
    #[inline]
    pub fn slot(&self, n: usize, d: usize) -> usize {
        n * self.off + d
    }

    /// Velocity of `slot`.
    #[inline]
    pub fn velocity(&self, slot: usize) -> [i32; 3] {
        self.velocities[slot]
    }

    /// x-component of the velocity of `slot`.
    #[inline]
    pub fn dx(&self, slot: usize) -> i32 {
        self.velocities[slot][0]
    }

    /// y-component of the velocity of `slot`.
    #[inline]
    pub fn dy(&self, slot: usize) -> i32 {
        self.velocities[slot][1]
    }

    /// z-component of the velocity of `slot`.
    #[inline]
    pub fn dz(&self, slot: usize) -> i32 {
        self.velocities[slot][2]
    }

    /// Weight of `slot` (zero for padding).
    #[inline]
    pub fn weight(&self, slot: usize) -> f64 {
        self.weights[slot]
    }

    /// The full velocity table, `ND` entries.
    pub fn velocities(&self) -> &[[i32; 3]] {
        &self.velocities
    }

    /// The full weight table, `ND` entries.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// `true` if `slot` does not hold a physical direction.
    ///
    /// Padding covers slot `OFF` (the mirrored rest position) and any
    /// slot with `d ≥ HSPEED` in either half.
    pub fn is_padding(&self, slot: usize) -> bool {
        let (n, d) = (slot / self.off, slot % self.off);
        d >= self.hspeed || (n == 1 && d == 0)
    }

    /// Slot of the direction opposite to `slot`. The rest slot is its own opposite.
    pub fn opposite(&self, slot: usize) -> usize {
        let (n, d) = (slot / self.off, slot % self.off);
        if d == 0 {
            slot
        } else {
            (1 - n) * self.off + d
        }
    }

    /// All address slots `(n, d)` with `n ∈ {0, 1}` and `d < HSPEED`.
    ///
    /// Includes the mirrored rest position `(1, 0)`, which the AA scheme
    /// reads and writes even though it is not a physical direction.
    pub fn address_slots(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..2).flat_map(move |n| (0..self.hspeed).map(move |d| (n, d)))
    }

    /// The `SPEEDS` physical directions as `(n, d)` pairs, rest first.
    pub fn directions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.address_slots().filter(|&(n, d)| !(n == 1 && d == 0))
    }
}

/// Run every construction-time check against `spec`.
fn validate(spec: &LatticeSpec) -> Result<(), LatticeError> {
    if !(1..=3).contains(&spec.dim) {
        return Err(LatticeError::InvalidDimension { dim: spec.dim });
    }
    if spec.speeds == 0 || spec.speeds % 2 == 0 {
        return Err(LatticeError::InvalidSpeedCount {
            speeds: spec.speeds,
        });
    }

    let hspeed = (spec.speeds + 1) / 2;
    let nd = spec.speeds + spec.pad;
    let off = nd / 2;
    if nd % 2 != 0 || off < hspeed {
        return Err(LatticeError::InvalidPadding {
            pad: spec.pad,
            hspeed,
            nd,
        });
    }

    for (table, found) in [
        ("velocities", spec.velocities.len()),
        ("weights", spec.weights.len()),
    ] {
        if found != nd {
            return Err(LatticeError::TableLength {
                table,
                expected: nd,
                found,
            });
        }
    }

    let c = &spec.velocities;
    let w = &spec.weights;
    let is_padding = |slot: usize| {
        let (n, d) = (slot / off, slot % off);
        d >= hspeed || (n == 1 && d == 0)
    };

    for (slot, (&velocity, &weight)) in c.iter().zip(w).enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(LatticeError::InvalidWeight { slot, weight });
        }
        if let Some(axis) = (spec.dim..3).find(|&axis| velocity[axis] != 0) {
            return Err(LatticeError::InactiveAxis { slot, axis });
        }
        if let Some(axis) = (0..3).find(|&axis| !(-1..=1).contains(&velocity[axis])) {
            return Err(LatticeError::VelocityOutOfHalo {
                slot,
                axis,
                component: velocity[axis],
            });
        }
        if (slot == 0 || is_padding(slot)) && velocity != [0, 0, 0] {
            return Err(LatticeError::NonZeroRest { slot });
        }
        if is_padding(slot) && weight != 0.0 {
            return Err(LatticeError::PaddingWeight { slot, weight });
        }
    }

    for d in 1..hspeed {
        let mirror = off + d;
        if c[d] == [0, 0, 0] {
            return Err(LatticeError::ZeroVelocity { slot: d });
        }
        if c[mirror] != [-c[d][0], -c[d][1], -c[d][2]] {
            return Err(LatticeError::Asymmetric { slot: d, mirror });
        }
        if (w[d] - w[mirror]).abs() > TOLERANCE {
            return Err(LatticeError::AsymmetricWeight { slot: d, mirror });
        }
    }

    for axis in 0..3 {
        let sum: i64 = c.iter().map(|v| i64::from(v[axis])).sum();
        if sum != 0 {
            return Err(LatticeError::NonZeroMomentum { axis, sum });
        }
    }

    let sum: f64 = w.iter().sum();
    if (sum - 1.0).abs() > TOLERANCE {
        return Err(LatticeError::WeightSum { sum });
    }

    let moment = |a: usize, b: usize| -> f64 {
        c.iter()
            .zip(w)
            .map(|(v, wi)| wi * f64::from(v[a] * v[b]))
            .sum()
    };
    let cs2 = moment(0, 0);
    for a in 0..spec.dim {
        for b in a..spec.dim {
            let m = moment(a, b);
            let expected = if a == b { cs2 } else { 0.0 };
            if (m - expected).abs() > TOLERANCE {
                return Err(LatticeError::Anisotropic {
                    a,
                    b,
                    moment: m,
                    expected,
                });
            }
        }
    }

    Ok(())
}
