//! Boundary element records and role-grouped sets.

use std::fmt;

use indexmap::IndexMap;
use swirl_space::Grid;

use crate::error::GeometryError;

/// What a boundary node does to the flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoundaryRole {
    /// Solid node: no flow through it.
    Wall,
    /// Prescribed-velocity node on the upstream face.
    Inlet,
    /// Prescribed-pressure node on the downstream face.
    Outlet,
}

impl fmt::Display for BoundaryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wall => write!(f, "wall"),
            Self::Inlet => write!(f, "inlet"),
            Self::Outlet => write!(f, "outlet"),
        }
    }
}

/// One boundary node with its prescribed macroscopic values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryElement {
    /// Node x coordinate.
    pub x: u32,
    /// Node y coordinate.
    pub y: u32,
    /// Node z coordinate.
    pub z: u32,
    /// Prescribed density.
    pub density: f64,
    /// Prescribed velocity `(u, v, w)`.
    pub velocity: [f64; 3],
}

impl BoundaryElement {
    /// Node coordinates `[x, y, z]`.
    pub fn coords(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Boundary elements grouped by role.
///
/// Roles appear in the order they were first pushed; elements within a
/// role keep their insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundarySet {
    groups: IndexMap<BoundaryRole, Vec<BoundaryElement>>,
}

impl BoundarySet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `element` to the group for `role`.
    pub fn push(&mut self, role: BoundaryRole, element: BoundaryElement) {
        self.groups.entry(role).or_default().push(element);
    }

    /// Elements with `role`, in insertion order. Empty if none were pushed.
    pub fn elements(&self, role: BoundaryRole) -> &[BoundaryElement] {
        self.groups.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of elements with `role`.
    pub fn count(&self, role: BoundaryRole) -> usize {
        self.elements(role).len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// `true` if no element has been pushed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Roles present, in first-insertion order.
    pub fn roles(&self) -> impl Iterator<Item = BoundaryRole> + '_ {
        self.groups.keys().copied()
    }

    /// All `(role, element)` pairs, grouped by role.
    pub fn iter(&self) -> impl Iterator<Item = (BoundaryRole, &BoundaryElement)> + '_ {
        self.groups
            .iter()
            .flat_map(|(&role, elements)| elements.iter().map(move |e| (role, e)))
    }

    /// Rasterise the set into one entry per grid node, in canonical node order.
    ///
    /// A node listed under several roles takes the role iterated last.
    /// Returns `Err(GeometryError::ElementOutOfBounds)` for an element
    /// outside `grid`.
    pub fn node_roles(&self, grid: &Grid) -> Result<Vec<Option<BoundaryRole>>, GeometryError> {
        let mut roles = vec![None; grid.node_count()];
        for (role, element) in self.iter() {
            let index = grid
                .try_node_index(element.x, element.y, element.z)
                .map_err(|_| GeometryError::ElementOutOfBounds {
                    coord: element.coords(),
                    dims: grid.dims(),
                })?;
            roles[index.0] = Some(role);
        }
        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(x: u32, y: u32, z: u32) -> BoundaryElement {
        BoundaryElement {
            x,
            y,
            z,
            density: 1.0,
            velocity: [0.05, 0.0, 0.0],
        }
    }

    #[test]
    fn groups_keep_first_insertion_order() {
        let mut set = BoundarySet::new();
        set.push(BoundaryRole::Outlet, element(3, 0, 0));
        set.push(BoundaryRole::Wall, element(1, 1, 0));
        set.push(BoundaryRole::Outlet, element(3, 1, 0));
        let roles: Vec<_> = set.roles().collect();
        assert_eq!(roles, [BoundaryRole::Outlet, BoundaryRole::Wall]);
        assert_eq!(set.count(BoundaryRole::Outlet), 2);
        assert_eq!(set.elements(BoundaryRole::Outlet)[1].y, 1);
        assert_eq!(set.count(BoundaryRole::Inlet), 0);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn node_roles_rasterises() {
        let grid = Grid::new(2, 2, 1).unwrap();
        let mut set = BoundarySet::new();
        set.push(BoundaryRole::Inlet, element(0, 1, 0));
        set.push(BoundaryRole::Wall, element(1, 0, 0));
        let roles = set.node_roles(&grid).unwrap();
        assert_eq!(
            roles,
            [None, Some(BoundaryRole::Wall), Some(BoundaryRole::Inlet), None]
        );
    }

    #[test]
    fn node_roles_rejects_foreign_element() {
        let grid = Grid::new(2, 2, 1).unwrap();
        let mut set = BoundarySet::new();
        set.push(BoundaryRole::Wall, element(0, 0, 1));
        assert!(matches!(
            set.node_roles(&grid),
            Err(GeometryError::ElementOutOfBounds { coord: [0, 0, 1], .. })
        ));
    }

    #[test]
    fn empty_set() {
        let set = BoundarySet::new();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
        assert_eq!(BoundaryRole::Inlet.to_string(), "inlet");
    }
}
