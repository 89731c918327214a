//! Error types for population storage and addressing.

use swirl_core::Parity;
use thiserror::Error;

use crate::translator::SlotCoord;

/// Errors from allocating a [`PopulationStore`](crate::PopulationStore).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `nodes * npop * nd` does not fit in `usize`.
    #[error("population buffer of {nodes} nodes x {npop} populations x {nd} slots overflows usize")]
    CapacityOverflow {
        /// Grid node count.
        nodes: usize,
        /// Number of populations.
        npop: usize,
        /// Slots per node and population.
        nd: usize,
    },
    /// The layout describes zero entries.
    #[error("population buffer would be empty")]
    Empty,
}

/// Addressing contract violations, reported by the checked entry points.
///
/// The unchecked hot-path methods of
/// [`AddressTranslator`](crate::AddressTranslator) only `debug_assert!`
/// these conditions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    /// A translator needs at least one population.
    #[error("population count must be at least 1")]
    NoPopulations,
    /// The buffer size does not fit the address space.
    #[error(transparent)]
    Capacity(#[from] StoreError),
    /// Node coordinate outside the grid.
    #[error("node {coord:?} outside grid {dims:?}")]
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: [u32; 3],
        /// Grid extents.
        dims: [u32; 3],
    },
    /// Half selector is not 0 or 1, or the in-half index is not below `OFF`.
    #[error("slot ({n}, {d}) outside the node layout (OFF = {off})")]
    SlotOutOfRange {
        /// Half selector.
        n: usize,
        /// In-half index.
        d: usize,
        /// Slots per half.
        off: usize,
    },
    /// Population index not below `NPOP`.
    #[error("population {p} out of range (npop = {npop})")]
    PopulationOutOfRange {
        /// The offending population.
        p: usize,
        /// Number of populations.
        npop: usize,
    },
    /// Two address slots of one phase map to the same buffer entry.
    #[error("{parity} phase writes offset {offset} from both {first:?} and {second:?}")]
    DuplicateWrite {
        /// Phase being checked.
        parity: Parity,
        /// The shared buffer position.
        offset: usize,
        /// The address slot that claimed the position first.
        first: SlotCoord,
        /// The address slot that collided with it.
        second: SlotCoord,
    },
}
