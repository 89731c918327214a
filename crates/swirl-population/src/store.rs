//! The single population buffer.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::StoreError;

/// Cache-line size the buffer is aligned to, in bytes.
pub const CACHE_LINE: usize = 64;

/// `f64` cells per cache line.
const LANES: usize = CACHE_LINE / std::mem::size_of::<u64>();

/// One 64-byte-aligned block of eight `f64` cells.
#[repr(C, align(64))]
#[derive(Default)]
struct CacheLine([AtomicU64; LANES]);

/// Position of one entry in a [`PopulationStore`].
///
/// Only [`AddressTranslator`](crate::AddressTranslator) creates offsets;
/// callers can inspect the raw position but not forge one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset(usize);

impl Offset {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw buffer position.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Shape of a population buffer: node count, population count, slots per node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PopulationLayout {
    /// Grid node count (`NX·NY·NZ`).
    pub nodes: usize,
    /// Number of populations (`NPOP`).
    pub npop: usize,
    /// Slots per node and population (`ND`).
    pub nd: usize,
}

impl PopulationLayout {
    /// Total entry count `nodes · npop · nd`.
    pub fn entries(&self) -> Result<usize, StoreError> {
        self.nodes
            .checked_mul(self.npop)
            .and_then(|n| n.checked_mul(self.nd))
            .ok_or(StoreError::CapacityOverflow {
                nodes: self.nodes,
                npop: self.npop,
                nd: self.nd,
            })
    }
}

/// Exclusively owned buffer of every population value of a simulation.
///
/// Sized once at allocation and never resized. Reads and writes take
/// `&self`: each cell is a relaxed `AtomicU64` holding `f64` bits, so
/// one store can be shared by all workers of a sweep.
pub struct PopulationStore {
    lines: Box<[CacheLine]>,
    len: usize,
}

impl PopulationStore {
    /// Allocate a zero-filled buffer for `layout`.
    ///
    /// Returns `Err(StoreError::CapacityOverflow)` if the entry count (or
    /// its byte size) overflows `usize`, and `Err(StoreError::Empty)` for
    /// a zero-entry layout.
    pub fn allocate(layout: PopulationLayout) -> Result<Self, StoreError> {
        let len = layout.entries()?;
        if len == 0 {
            return Err(StoreError::Empty);
        }
        let line_count = len.div_ceil(LANES);
        if line_count.checked_mul(CACHE_LINE).is_none() {
            return Err(StoreError::CapacityOverflow {
                nodes: layout.nodes,
                npop: layout.npop,
                nd: layout.nd,
            });
        }
        let lines = (0..line_count).map(|_| CacheLine::default()).collect();
        Ok(Self { lines, len })
    }

    /// Number of addressable entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; allocation rejects empty layouts.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes held by the buffer, including the tail of the last cache line.
    pub fn memory_bytes(&self) -> usize {
        self.lines.len() * CACHE_LINE
    }

    /// Read the value at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` lies beyond the buffer, which only happens when
    /// it was minted by a translator for a different layout.
    #[inline]
    pub fn load(&self, offset: Offset) -> f64 {
        f64::from_bits(self.cell(offset).load(Ordering::Relaxed))
    }

    /// Write `value` at `offset`.
    ///
    /// # Panics
    ///
    /// As for [`load`](Self::load).
    #[inline]
    pub fn store(&self, offset: Offset, value: f64) {
        self.cell(offset).store(value.to_bits(), Ordering::Relaxed);
    }

    /// Set every entry to `value`.
    pub fn fill(&mut self, value: f64) {
        let bits = value.to_bits();
        for line in self.lines.iter_mut() {
            for cell in line.0.iter_mut() {
                *cell.get_mut() = bits;
            }
        }
    }

    /// Copy of all entries in buffer order.
    pub fn to_vec(&self) -> Vec<f64> {
        (0..self.len).map(|i| self.load(Offset(i))).collect()
    }

    #[inline]
    fn cell(&self, offset: Offset) -> &AtomicU64 {
        debug_assert!(
            offset.0 < self.len,
            "offset {} beyond buffer of {} entries",
            offset.0,
            self.len
        );
        &self.lines[offset.0 / LANES].0[offset.0 % LANES]
    }
}

impl std::fmt::Debug for PopulationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopulationStore")
            .field("len", &self.len)
            .field("memory_bytes", &self.memory_bytes())
            .finish()
    }
}
