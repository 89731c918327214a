//! Strongly-typed identifiers.

use std::fmt;

/// Monotonically increasing time-step counter.
///
/// Incremented each time the simulation completes one sweep. The
/// parity of the *next* step is `Parity::of_step(step.0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// The following step.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Flat index of a grid node in z-then-y-then-x order.
///
/// `NodeIndex(i)` is node `i` of the grid's canonical ordering, so
/// `i = (z * ny + y) * nx + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_next_increments() {
        assert_eq!(StepId(0).next(), StepId(1));
        assert_eq!(StepId::from(41).next().to_string(), "42");
    }

    #[test]
    fn node_index_display() {
        assert_eq!(NodeIndex::from(7).to_string(), "7");
    }
}
