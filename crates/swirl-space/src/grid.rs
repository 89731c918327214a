//! Three-dimensional structured grid extents and canonical node ordering.

use crate::error::SpaceError;
use crate::neighbourhood::Neighbourhood;
use swirl_core::NodeIndex;

/// A structured `nx × ny × nz` grid.
///
/// Two-dimensional simulations use `nz = 1`. Nodes are ordered
/// z-then-y-then-x, so `NodeIndex((z * ny + y) * nx + x)` names node
/// `(x, y, z)`; this is the same nesting the population buffer uses.
///
/// # Examples
///
/// ```
/// use swirl_space::Grid;
/// use swirl_core::NodeIndex;
///
/// let grid = Grid::new(4, 3, 2).unwrap();
/// assert_eq!(grid.node_count(), 24);
/// assert_eq!(grid.node_index(1, 2, 1), NodeIndex(21));
/// assert_eq!(grid.coords(NodeIndex(21)), [1, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    nx: u32,
    ny: u32,
    nz: u32,
    node_count: usize,
}

impl Grid {
    /// Maximum extent per axis: halo arithmetic uses signed offsets, so each axis must fit `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a grid with the given extents.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if any extent is 0,
    /// `Err(SpaceError::DimensionTooLarge)` if any exceeds [`Self::MAX_DIM`],
    /// or `Err(SpaceError::NodeCountOverflow)` if the node count does not
    /// fit in `usize`.
    pub fn new(nx: u32, ny: u32, nz: u32) -> Result<Self, SpaceError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(SpaceError::EmptySpace);
        }
        for (name, value) in [("nx", nx), ("ny", ny), ("nz", nz)] {
            if value > Self::MAX_DIM {
                return Err(SpaceError::DimensionTooLarge {
                    name,
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        let node_count = (nx as usize)
            .checked_mul(ny as usize)
            .and_then(|n| n.checked_mul(nz as usize))
            .ok_or(SpaceError::NodeCountOverflow { nx, ny, nz })?;
        Ok(Self {
            nx,
            ny,
            nz,
            node_count,
        })
    }

    /// Extent along x.
    pub fn nx(&self) -> u32 {
        self.nx
    }

    /// Extent along y.
    pub fn ny(&self) -> u32 {
        self.ny
    }

    /// Extent along z.
    pub fn nz(&self) -> u32 {
        self.nz
    }

    /// Extents as `[nx, ny, nz]`.
    pub fn dims(&self) -> [u32; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Always `false`; construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `true` if `(x, y, z)` lies inside the grid.
    pub fn contains(&self, x: u32, y: u32, z: u32) -> bool {
        x < self.nx && y < self.ny && z < self.nz
    }

    /// Flat index of node `(x, y, z)`.
    ///
    /// The coordinate must lie inside the grid; this is checked in debug
    /// builds only. Use [`try_node_index`](Self::try_node_index) for
    /// unvalidated input.
    #[inline]
    pub fn node_index(&self, x: u32, y: u32, z: u32) -> NodeIndex {
        debug_assert!(self.contains(x, y, z), "node ({x}, {y}, {z}) outside grid");
        NodeIndex((z as usize * self.ny as usize + y as usize) * self.nx as usize + x as usize)
    }

    /// Checked form of [`node_index`](Self::node_index).
    pub fn try_node_index(&self, x: u32, y: u32, z: u32) -> Result<NodeIndex, SpaceError> {
        if !self.contains(x, y, z) {
            return Err(SpaceError::CoordOutOfBounds {
                coord: [x, y, z],
                bounds: format!(
                    "x in [0, {}), y in [0, {}), z in [0, {})",
                    self.nx, self.ny, self.nz
                ),
            });
        }
        Ok(self.node_index(x, y, z))
    }

    /// Coordinates `[x, y, z]` of a flat node index. Inverse of [`node_index`](Self::node_index).
    #[inline]
    pub fn coords(&self, index: NodeIndex) -> [u32; 3] {
        debug_assert!(index.0 < self.node_count, "node {index} outside grid");
        let plane = self.nx as usize * self.ny as usize;
        let z = index.0 / plane;
        let rest = index.0 % plane;
        let y = rest / self.nx as usize;
        let x = rest % self.nx as usize;
        [x as u32, y as u32, z as u32]
    }

    /// Periodic halo triples around `(x, y, z)`.
    #[inline]
    pub fn neighbourhood(&self, x: u32, y: u32, z: u32) -> Neighbourhood {
        Neighbourhood {
            x: wrap_triple(x, self.nx),
            y: wrap_triple(y, self.ny),
            z: wrap_triple(z, self.nz),
        }
    }

    /// Periodic halo triples around a flat node index.
    #[inline]
    pub fn neighbourhood_of(&self, index: NodeIndex) -> Neighbourhood {
        let [x, y, z] = self.coords(index);
        self.neighbourhood(x, y, z)
    }

    /// Node reached from `(x, y, z)` by the periodic shift `offset`.
    pub fn shifted(&self, [x, y, z]: [u32; 3], offset: [i32; 3]) -> [u32; 3] {
        [
            wrap_axis(i64::from(x) + i64::from(offset[0]), self.nx),
            wrap_axis(i64::from(y) + i64::from(offset[1]), self.ny),
            wrap_axis(i64::from(z) + i64::from(offset[2]), self.nz),
        ]
    }

    /// All node coordinates in canonical order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        (0..self.node_count).map(move |i| self.coords(NodeIndex(i)))
    }
}

/// `[v - 1, v, v + 1]` on a periodic axis of length `len`.
#[inline]
fn wrap_triple(v: u32, len: u32) -> [u32; 3] {
    let prev = if v == 0 { len - 1 } else { v - 1 };
    let next = if v + 1 == len { 0 } else { v + 1 };
    [prev, v, next]
}

/// Reduce `val` onto `[0, len)` periodically.
fn wrap_axis(val: i64, len: u32) -> u32 {
    val.rem_euclid(i64::from(len)) as u32
}
