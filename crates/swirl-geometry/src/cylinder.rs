//! Channel flow past a circular cylinder.

use std::fmt;
use std::str::FromStr;

use swirl_space::Grid;

use crate::boundary::{BoundaryElement, BoundaryRole, BoundarySet};
use crate::error::GeometryError;

/// Main flow direction of a [`Cylinder`] scenario.
///
/// The obstacle is a disc in the plane spanned by the flow axis and the
/// next axis in cyclic order, extruded along the remaining one:
///
/// | orientation | flow | disc plane | extruded along |
/// |-------------|------|------------|----------------|
/// | `X`         | x    | x–y        | z              |
/// | `Y`         | y    | y–z        | x              |
/// | `Z`         | z    | z–x        | y              |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Flow along x.
    #[default]
    X,
    /// Flow along y.
    Y,
    /// Flow along z.
    Z,
}

impl Orientation {
    /// Axis indices `(flow, cross, span)`.
    fn axes(self) -> (usize, usize, usize) {
        match self {
            Self::X => (0, 1, 2),
            Self::Y => (1, 2, 0),
            Self::Z => (2, 0, 1),
        }
    }
}

impl FromStr for Orientation {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            other => Err(GeometryError::UnknownOrientation {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Cylinder-in-a-channel scenario.
///
/// Every node receives the same prescribed `density` and `velocity`.
/// Classification, first match wins:
///
/// 1. inside the disc (distance to `centre` in the disc plane at most
///    `radius`): [`BoundaryRole::Wall`];
/// 2. on a side face of the channel: [`BoundaryRole::Wall`] if
///    `side_walls`, otherwise left as fluid;
/// 3. on the first plane along the flow axis: [`BoundaryRole::Inlet`];
/// 4. on the last plane along the flow axis: [`BoundaryRole::Outlet`].
///
/// An axis of extent 1 has no side faces, so planar grids get inlets and
/// outlets along their full height.
///
/// # Examples
///
/// ```
/// use swirl_geometry::{BoundaryRole, Cylinder, Orientation};
/// use swirl_space::Grid;
///
/// let grid = Grid::new(16, 8, 8).unwrap();
/// let cylinder = Cylinder {
///     radius: 2,
///     centre: [5, 4, 4],
///     orientation: "x".parse().unwrap(),
///     side_walls: true,
/// };
/// let set = cylinder.build(&grid, 1.0, [0.05, 0.0, 0.0]).unwrap();
/// assert_eq!(set.count(BoundaryRole::Inlet), 6 * 6);
/// assert_eq!(set.count(BoundaryRole::Outlet), 6 * 6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cylinder {
    /// Obstacle radius in lattice units.
    pub radius: u32,
    /// Obstacle centre; the coordinate along the extrusion axis is ignored
    /// but must still lie inside the grid.
    pub centre: [u32; 3],
    /// Main flow direction.
    pub orientation: Orientation,
    /// Close the channel with walls on its side faces.
    pub side_walls: bool,
}

impl Cylinder {
    /// Classify every node of `grid`, iterating z outermost and x innermost.
    ///
    /// Returns `Err(GeometryError::CentreOutOfBounds)` if `centre` lies
    /// outside the grid.
    pub fn build(
        &self,
        grid: &Grid,
        density: f64,
        velocity: [f64; 3],
    ) -> Result<BoundarySet, GeometryError> {
        let [cx, cy, cz] = self.centre;
        if !grid.contains(cx, cy, cz) {
            return Err(GeometryError::CentreOutOfBounds {
                centre: self.centre,
                dims: grid.dims(),
            });
        }

        let dims = grid.dims();
        let (flow, cross, span) = self.orientation.axes();
        let r2 = i64::from(self.radius) * i64::from(self.radius);
        let on_face = |coord: &[u32; 3], axis: usize| {
            dims[axis] > 1 && (coord[axis] == 0 || coord[axis] == dims[axis] - 1)
        };

        let mut set = BoundarySet::new();
        for coord in grid.iter_nodes() {
            let da = i64::from(coord[flow]) - i64::from(self.centre[flow]);
            let db = i64::from(coord[cross]) - i64::from(self.centre[cross]);
            let role = if da * da + db * db <= r2 {
                Some(BoundaryRole::Wall)
            } else if on_face(&coord, cross) || on_face(&coord, span) {
                self.side_walls.then_some(BoundaryRole::Wall)
            } else if coord[flow] == 0 {
                Some(BoundaryRole::Inlet)
            } else if coord[flow] == dims[flow] - 1 {
                Some(BoundaryRole::Outlet)
            } else {
                None
            };
            if let Some(role) = role {
                set.push(
                    role,
                    BoundaryElement {
                        x: coord[0],
                        y: coord[1],
                        z: coord[2],
                        density,
                        velocity,
                    },
                );
            }
        }

        tracing::debug!(
            "cylinder geometry ({}): {} wall, {} inlet, {} outlet nodes",
            self.orientation,
            set.count(BoundaryRole::Wall),
            set.count(BoundaryRole::Inlet),
            set.count(BoundaryRole::Outlet)
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cylinder(orientation: Orientation, side_walls: bool) -> Cylinder {
        Cylinder {
            radius: 1,
            centre: [3, 3, 3],
            orientation,
            side_walls,
        }
    }

    #[test]
    fn parse_orientation() {
        assert_eq!("y".parse::<Orientation>(), Ok(Orientation::Y));
        assert_eq!(
            "diagonal".parse::<Orientation>(),
            Err(GeometryError::UnknownOrientation {
                name: "diagonal".into()
            })
        );
        assert_eq!(Orientation::Z.to_string(), "z");
    }

    #[test]
    fn centre_outside_grid_rejected() {
        let grid = Grid::new(4, 4, 4).unwrap();
        let mut c = cylinder(Orientation::X, true);
        c.centre = [1, 4, 1];
        assert!(matches!(
            c.build(&grid, 1.0, [0.0; 3]),
            Err(GeometryError::CentreOutOfBounds { .. })
        ));
    }

    #[test]
    fn disc_nodes_are_walls_along_whole_span() {
        let grid = Grid::new(8, 7, 5).unwrap();
        let set = cylinder(Orientation::X, false).build(&grid, 1.0, [0.1, 0.0, 0.0]).unwrap();
        let walls = set.elements(BoundaryRole::Wall);
        // radius 1 disc: centre plus 4 axis neighbours, on every z plane.
        assert_eq!(walls.len(), 5 * 5);
        assert!(walls.iter().all(|e| {
            let (dx, dy) = (i64::from(e.x) - 3, i64::from(e.y) - 3);
            dx * dx + dy * dy <= 1
        }));
    }

    #[test]
    fn side_walls_toggle() {
        let grid = Grid::new(6, 6, 6).unwrap();
        let open = cylinder(Orientation::X, false).build(&grid, 1.0, [0.0; 3]).unwrap();
        let closed = cylinder(Orientation::X, true).build(&grid, 1.0, [0.0; 3]).unwrap();
        // Inlet/outlet planes exclude the side faces either way.
        assert_eq!(open.count(BoundaryRole::Inlet), 16);
        assert_eq!(closed.count(BoundaryRole::Inlet), 16);
        // 6x6x6 minus the 4x4 interior cross-section on each plane.
        let side = 6 * 36 - 6 * 16;
        // Disc nodes on side faces are counted once, as disc walls.
        let disc = 5 * 6;
        let disc_on_sides = 5 * 2;
        assert_eq!(open.count(BoundaryRole::Wall), disc);
        assert_eq!(closed.count(BoundaryRole::Wall), disc + side - disc_on_sides);
    }

    #[test]
    fn orientations_permute_axes() {
        let grid = Grid::new(6, 6, 6).unwrap();
        for orientation in [Orientation::X, Orientation::Y, Orientation::Z] {
            let set = cylinder(orientation, true).build(&grid, 1.0, [0.0; 3]).unwrap();
            let (flow, _, _) = orientation.axes();
            assert!(set
                .elements(BoundaryRole::Inlet)
                .iter()
                .all(|e| e.coords()[flow] == 0));
            assert!(set
                .elements(BoundaryRole::Outlet)
                .iter()
                .all(|e| e.coords()[flow] == 5));
            assert_eq!(set.count(BoundaryRole::Wall), 5 * 6 + 6 * 36 - 6 * 16 - 5 * 2);
        }
    }

    #[test]
    fn elements_carry_prescribed_values_in_canonical_order() {
        let grid = Grid::new(5, 5, 5).unwrap();
        let set = cylinder(Orientation::X, true).build(&grid, 1.2, [0.03, 0.0, 0.0]).unwrap();
        for (_, e) in set.iter() {
            assert_eq!(e.density, 1.2);
            assert_eq!(e.velocity, [0.03, 0.0, 0.0]);
        }
        let walls = set.elements(BoundaryRole::Wall);
        let order: Vec<_> = walls.iter().map(|e| grid.node_index(e.x, e.y, e.z)).collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn planar_grid_has_no_span_faces() {
        let grid = Grid::new(10, 6, 1).unwrap();
        let c = Cylinder {
            radius: 1,
            centre: [4, 3, 0],
            orientation: Orientation::X,
            side_walls: true,
        };
        let set = c.build(&grid, 1.0, [0.05, 0.0, 0.0]).unwrap();
        assert_eq!(set.count(BoundaryRole::Inlet), 4);
        assert_eq!(set.count(BoundaryRole::Outlet), 4);
        assert_eq!(set.count(BoundaryRole::Wall), 5 + 2 * 10);
    }
}
