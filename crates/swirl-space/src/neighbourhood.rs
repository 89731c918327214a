//! Periodic halo triples.

/// Wrapped coordinates `[c - 1, c, c + 1]` on each axis around one node.
///
/// Index `1 + c_k` selects the coordinate reached by a lattice velocity
/// component `c_k ∈ {-1, 0, 1}`, so a neighbour across a periodic face is
/// looked up exactly like an interior one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Neighbourhood {
    /// `[x - 1, x, x + 1]`, wrapped.
    pub x: [u32; 3],
    /// `[y - 1, y, y + 1]`, wrapped.
    pub y: [u32; 3],
    /// `[z - 1, z, z + 1]`, wrapped.
    pub z: [u32; 3],
}

impl Neighbourhood {
    /// The centre node `[x, y, z]`.
    pub fn centre(&self) -> [u32; 3] {
        [self.x[1], self.y[1], self.z[1]]
    }

    /// The node reached from the centre by a unit velocity `c`.
    ///
    /// Components of `c` must lie in `-1..=1`.
    #[inline]
    pub fn step(&self, c: [i32; 3]) -> [u32; 3] {
        debug_assert!(
            c.iter().all(|v| (-1..=1).contains(v)),
            "velocity {c:?} exceeds the halo"
        );
        [
            self.x[(1 + c[0]) as usize],
            self.y[(1 + c[1]) as usize],
            self.z[(1 + c[2]) as usize],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Neighbourhood {
        Neighbourhood {
            x: [3, 0, 1],
            y: [1, 2, 3],
            z: [0, 0, 0],
        }
    }

    #[test]
    fn centre_is_middle_entry() {
        assert_eq!(sample().centre(), [0, 2, 0]);
    }

    #[test]
    fn step_selects_halo_entries() {
        let nb = sample();
        assert_eq!(nb.step([0, 0, 0]), [0, 2, 0]);
        assert_eq!(nb.step([-1, 1, 0]), [3, 3, 0]);
        assert_eq!(nb.step([1, -1, 1]), [1, 1, 0]);
    }
}
