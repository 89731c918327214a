//! Standard velocity sets.
//!
//! Every preset uses one padding slot, so `ND = SPEEDS + 1` and the
//! negative half starts at `OFF = HSPEED`. Presets are built without
//! re-running validation; the unit tests in [`crate::model`] check each
//! of them against [`LatticeModel::new`].

use crate::model::{LatticeModel, LatticeSpec};

const D2Q9_VELOCITIES: [[i32; 3]; 10] = [
    [0, 0, 0], // rest
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [1, -1, 0],
    [0, 0, 0], // padding
    [-1, 0, 0],
    [0, -1, 0],
    [-1, -1, 0],
    [-1, 1, 0],
];

const D3Q15_VELOCITIES: [[i32; 3]; 16] = [
    [0, 0, 0], // rest
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 1, 1],
    [1, 1, -1],
    [1, -1, 1],
    [1, -1, -1],
    [0, 0, 0], // padding
    [-1, 0, 0],
    [0, -1, 0],
    [0, 0, -1],
    [-1, -1, -1],
    [-1, -1, 1],
    [-1, 1, -1],
    [-1, 1, 1],
];

const D3Q19_VELOCITIES: [[i32; 3]; 20] = [
    [0, 0, 0], // rest
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 1, 0],
    [1, -1, 0],
    [1, 0, 1],
    [1, 0, -1],
    [0, 1, 1],
    [0, 1, -1],
    [0, 0, 0], // padding
    [-1, 0, 0],
    [0, -1, 0],
    [0, 0, -1],
    [-1, -1, 0],
    [-1, 1, 0],
    [-1, 0, -1],
    [-1, 0, 1],
    [0, -1, -1],
    [0, -1, 1],
];

const D3Q27_VELOCITIES: [[i32; 3]; 28] = [
    [0, 0, 0], // rest
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 1, 0],
    [1, -1, 0],
    [1, 0, 1],
    [1, 0, -1],
    [0, 1, 1],
    [0, 1, -1],
    [1, 1, 1],
    [1, 1, -1],
    [1, -1, 1],
    [1, -1, -1],
    [0, 0, 0], // padding
    [-1, 0, 0],
    [0, -1, 0],
    [0, 0, -1],
    [-1, -1, 0],
    [-1, 1, 0],
    [-1, 0, -1],
    [-1, 0, 1],
    [0, -1, -1],
    [0, -1, 1],
    [-1, -1, -1],
    [-1, -1, 1],
    [-1, 1, -1],
    [-1, 1, 1],
];

/// Mirror a positive-half weight table (rest first) into a full slot table
/// with a zero-weight padding slot between the halves.
fn mirrored_weights(half: &[f64]) -> Vec<f64> {
    let mut weights = half.to_vec();
    weights.push(0.0);
    weights.extend_from_slice(&half[1..]);
    weights
}

impl LatticeSpec {
    /// Two-dimensional nine-velocity set.
    pub fn d2q9() -> Self {
        let (axis, diag) = (1.0 / 9.0, 1.0 / 36.0);
        Self {
            name: "D2Q9".into(),
            dim: 2,
            speeds: 9,
            pad: 1,
            velocities: D2Q9_VELOCITIES.to_vec(),
            weights: mirrored_weights(&[4.0 / 9.0, axis, axis, diag, diag]),
        }
    }

    /// Three-dimensional fifteen-velocity set.
    pub fn d3q15() -> Self {
        let (face, corner) = (1.0 / 9.0, 1.0 / 72.0);
        Self {
            name: "D3Q15".into(),
            dim: 3,
            speeds: 15,
            pad: 1,
            velocities: D3Q15_VELOCITIES.to_vec(),
            weights: mirrored_weights(&[
                2.0 / 9.0,
                face,
                face,
                face,
                corner,
                corner,
                corner,
                corner,
            ]),
        }
    }

    /// Three-dimensional nineteen-velocity set (reference model).
    pub fn d3q19() -> Self {
        let (face, edge) = (1.0 / 18.0, 1.0 / 36.0);
        Self {
            name: "D3Q19".into(),
            dim: 3,
            speeds: 19,
            pad: 1,
            velocities: D3Q19_VELOCITIES.to_vec(),
            weights: mirrored_weights(&[
                1.0 / 3.0,
                face,
                face,
                face,
                edge,
                edge,
                edge,
                edge,
                edge,
                edge,
            ]),
        }
    }

    /// Three-dimensional twenty-seven-velocity set.
    pub fn d3q27() -> Self {
        let (face, edge, corner) = (2.0 / 27.0, 1.0 / 54.0, 1.0 / 216.0);
        Self {
            name: "D3Q27".into(),
            dim: 3,
            speeds: 27,
            pad: 1,
            velocities: D3Q27_VELOCITIES.to_vec(),
            weights: mirrored_weights(&[
                8.0 / 27.0,
                face,
                face,
                face,
                edge,
                edge,
                edge,
                edge,
                edge,
                edge,
                corner,
                corner,
                corner,
                corner,
            ]),
        }
    }
}

impl LatticeModel {
    /// The D2Q9 model.
    pub fn d2q9() -> Self {
        Self::assemble(LatticeSpec::d2q9())
    }

    /// The D3Q15 model.
    pub fn d3q15() -> Self {
        Self::assemble(LatticeSpec::d3q15())
    }

    /// The D3Q19 reference model.
    pub fn d3q19() -> Self {
        Self::assemble(LatticeSpec::d3q19())
    }

    /// The D3Q27 model.
    pub fn d3q27() -> Self {
        Self::assemble(LatticeSpec::d3q27())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_weights_insert_padding() {
        let w = mirrored_weights(&[0.5, 0.25]);
        assert_eq!(w, vec![0.5, 0.25, 0.0, 0.25]);
    }

    #[test]
    fn d3q19_tables_match_reference_ordering() {
        let l = LatticeModel::d3q19();
        let dx: Vec<i32> = (0..l.nd()).map(|s| l.dx(s)).collect();
        let dy: Vec<i32> = (0..l.nd()).map(|s| l.dy(s)).collect();
        let dz: Vec<i32> = (0..l.nd()).map(|s| l.dz(s)).collect();
        assert_eq!(
            dx,
            [0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 0, -1, 0, 0, -1, -1, -1, -1, 0, 0]
        );
        assert_eq!(
            dy,
            [0, 0, 1, 0, 1, -1, 0, 0, 1, 1, 0, 0, -1, 0, -1, 1, 0, 0, -1, -1]
        );
        assert_eq!(
            dz,
            [0, 0, 0, 1, 0, 0, 1, -1, 1, -1, 0, 0, 0, -1, 0, 0, -1, 1, -1, 1]
        );
    }

    #[test]
    fn d2q9_is_planar() {
        let l = LatticeModel::d2q9();
        assert_eq!(l.dim(), 2);
        assert!(l.velocities().iter().all(|c| c[2] == 0));
    }
}
