//! Per-node density and velocity buffer.

use swirl_space::Grid;

use crate::error::SnapshotError;

/// Values stored per node: density, then the three velocity components.
pub const COMPONENTS: usize = 4;

/// Macroscopic field of a simulation: `(rho, ux, uy, uz)` for every node.
///
/// Nodes are stored in the grid's canonical order (z outermost, x
/// innermost), `COMPONENTS` consecutive `f64` values each.
///
/// # Examples
///
/// ```
/// use swirl_continuum::Continuum;
/// use swirl_space::Grid;
///
/// let grid = Grid::new(2, 2, 1).unwrap();
/// let mut field = Continuum::new(grid).unwrap();
/// field.set(1, 1, 0, 1.02, [0.1, 0.0, 0.0]);
/// assert_eq!(field.density(1, 1, 0), 1.02);
/// assert_eq!(field.len(), 16);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Continuum {
    grid: Grid,
    data: Vec<f64>,
}

impl Continuum {
    /// A zero-filled field for `grid`.
    ///
    /// Returns `Err(SnapshotError::CapacityOverflow)` if the buffer size
    /// overflows `usize`.
    pub fn new(grid: Grid) -> Result<Self, SnapshotError> {
        let nodes = grid.node_count();
        let len = nodes
            .checked_mul(COMPONENTS)
            .filter(|len| len.checked_mul(std::mem::size_of::<f64>()).is_some())
            .ok_or(SnapshotError::CapacityOverflow { nodes })?;
        Ok(Self {
            grid,
            data: vec![0.0; len],
        })
    }

    /// The grid this field covers.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of `f64` values (`nodes · COMPONENTS`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; grids are never empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Byte size of the buffer, which is also the snapshot file size.
    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.data.as_slice())
    }

    /// All values, node-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// All values, node-major, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Density at node `(x, y, z)`.
    pub fn density(&self, x: u32, y: u32, z: u32) -> f64 {
        self.data[self.base(x, y, z)]
    }

    /// Velocity at node `(x, y, z)`.
    pub fn velocity(&self, x: u32, y: u32, z: u32) -> [f64; 3] {
        let i = self.base(x, y, z);
        [self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Set density and velocity at node `(x, y, z)`.
    pub fn set(&mut self, x: u32, y: u32, z: u32, density: f64, velocity: [f64; 3]) {
        let i = self.base(x, y, z);
        self.data[i..i + COMPONENTS].copy_from_slice(&[
            density,
            velocity[0],
            velocity[1],
            velocity[2],
        ]);
    }

    /// Total mass `Σ rho` over all nodes.
    pub fn total_density(&self) -> f64 {
        self.data.chunks_exact(COMPONENTS).map(|node| node[0]).sum()
    }

    fn base(&self, x: u32, y: u32, z: u32) -> usize {
        self.grid.node_index(x, y, z).0 * COMPONENTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let c = Continuum::new(Grid::new(3, 2, 2).unwrap()).unwrap();
        assert_eq!(c.len(), 48);
        assert_eq!(c.byte_len(), 384);
        assert!(c.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn set_and_get_follow_canonical_order() {
        let mut c = Continuum::new(Grid::new(3, 2, 2).unwrap()).unwrap();
        c.set(2, 1, 1, 0.9, [0.1, -0.2, 0.3]);
        // node (1·2 + 1)·3 + 2 = 11
        assert_eq!(&c.as_slice()[44..48], &[0.9, 0.1, -0.2, 0.3]);
        assert_eq!(c.density(2, 1, 1), 0.9);
        assert_eq!(c.velocity(2, 1, 1), [0.1, -0.2, 0.3]);
    }

    #[test]
    fn total_density_sums_first_component() {
        let mut c = Continuum::new(Grid::new(2, 1, 1).unwrap()).unwrap();
        c.set(0, 0, 0, 1.0, [5.0, 5.0, 5.0]);
        c.set(1, 0, 0, 0.5, [0.0; 3]);
        assert_eq!(c.total_density(), 1.5);
    }
}
