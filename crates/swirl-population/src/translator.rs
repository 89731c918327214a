//! AA-pattern address translation.
//!
//! Every population value has one slot in the buffer, but which slot
//! depends on the step parity:
//!
//! - **even** steps read slot `(1 − n, d)` and write slot `(n, d)` of the
//!   local node, a pure in-place collision;
//! - **odd** steps read slot `(n, d)` of the upstream node `x − c` and
//!   write slot `(1 − n, d)` of the downstream node `x + c`, so streaming
//!   happens on both sides of the collision.
//!
//! After an even and an odd step every population has moved by `2c`,
//! exactly as with a two-buffer push/pull scheme.

use std::sync::Arc;

use swirl_core::{blend, NodeIndex, Parity};
use swirl_lattice::LatticeModel;
use swirl_space::{Grid, Neighbourhood};

use crate::error::AddressError;
use crate::store::{Offset, PopulationLayout};

/// Decoded buffer position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotCoord {
    /// Node x coordinate.
    pub x: u32,
    /// Node y coordinate.
    pub y: u32,
    /// Node z coordinate.
    pub z: u32,
    /// Population index.
    pub p: usize,
    /// Half selector (`0` positive, `1` negative).
    pub n: usize,
    /// Index within the half.
    pub d: usize,
}

/// Maps logical `(node, population, half, direction)` coordinates and the
/// step parity to [`Offset`]s into a
/// [`PopulationStore`](crate::PopulationStore).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use swirl_core::Parity;
/// use swirl_lattice::LatticeModel;
/// use swirl_population::AddressTranslator;
/// use swirl_space::Grid;
///
/// let grid = Grid::new(4, 4, 4).unwrap();
/// let tr = AddressTranslator::new(grid, Arc::new(LatticeModel::d3q19()), 1).unwrap();
/// let nb = grid.neighbourhood(1, 1, 1);
///
/// // Even steps stay local: read the reversed half, write the regular one.
/// assert_eq!(tr.read_offset(Parity::Even, &nb, 0, 1, 0), tr.linearize(1, 1, 1, 1, 1, 0));
/// assert_eq!(tr.write_offset(Parity::Even, &nb, 0, 1, 0), tr.linearize(1, 1, 1, 0, 1, 0));
///
/// // Odd steps: direction (0, 1) is c = (1, 0, 0); read upstream, write downstream.
/// assert_eq!(tr.read_offset(Parity::Odd, &nb, 0, 1, 0), tr.linearize(0, 1, 1, 0, 1, 0));
/// assert_eq!(tr.write_offset(Parity::Odd, &nb, 0, 1, 0), tr.linearize(2, 1, 1, 1, 1, 0));
/// ```
#[derive(Clone, Debug)]
pub struct AddressTranslator {
    grid: Grid,
    lattice: Arc<LatticeModel>,
    npop: usize,
    nd: usize,
    off: usize,
    len: usize,
}

impl AddressTranslator {
    /// Create a translator for `npop` populations of `lattice` on `grid`.
    ///
    /// Returns `Err(AddressError::NoPopulations)` for `npop == 0` and
    /// `Err(AddressError::Capacity)` if the buffer size overflows `usize`.
    pub fn new(grid: Grid, lattice: Arc<LatticeModel>, npop: usize) -> Result<Self, AddressError> {
        if npop == 0 {
            return Err(AddressError::NoPopulations);
        }
        let layout = PopulationLayout {
            nodes: grid.node_count(),
            npop,
            nd: lattice.nd(),
        };
        let len = layout.entries()?;
        Ok(Self {
            grid,
            nd: lattice.nd(),
            off: lattice.off(),
            lattice,
            npop,
            len,
        })
    }

    /// The grid this translator addresses.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The lattice model this translator indexes against.
    pub fn lattice(&self) -> &Arc<LatticeModel> {
        &self.lattice
    }

    /// Number of populations.
    pub fn npop(&self) -> usize {
        self.npop
    }

    /// Total number of buffer entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; construction rejects empty layouts.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Buffer shape to allocate a matching store with.
    pub fn layout(&self) -> PopulationLayout {
        PopulationLayout {
            nodes: self.grid.node_count(),
            npop: self.npop,
            nd: self.nd,
        }
    }

    /// Offset of slot `(n, d)` of population `p` at node `(x, y, z)`.
    ///
    /// `(((z·NY + y)·NX + x)·NPOP + p)·ND + n·OFF + d`. Preconditions are
    /// checked in debug builds; see [`try_linearize`](Self::try_linearize).
    #[inline]
    pub fn linearize(&self, x: u32, y: u32, z: u32, n: usize, d: usize, p: usize) -> Offset {
        debug_assert!(self.grid.contains(x, y, z), "node ({x}, {y}, {z}) outside grid");
        debug_assert!(n < 2 && d < self.off, "slot ({n}, {d}) outside node layout");
        debug_assert!(p < self.npop, "population {p} out of range");
        let node = self.grid.node_index(x, y, z).0;
        Offset::new((node * self.npop + p) * self.nd + n * self.off + d)
    }

    /// Checked form of [`linearize`](Self::linearize).
    pub fn try_linearize(
        &self,
        x: u32,
        y: u32,
        z: u32,
        n: usize,
        d: usize,
        p: usize,
    ) -> Result<Offset, AddressError> {
        if !self.grid.contains(x, y, z) {
            return Err(AddressError::CoordOutOfBounds {
                coord: [x, y, z],
                dims: self.grid.dims(),
            });
        }
        if n > 1 || d >= self.off {
            return Err(AddressError::SlotOutOfRange { n, d, off: self.off });
        }
        if p >= self.npop {
            return Err(AddressError::PopulationOutOfRange { p, npop: self.npop });
        }
        Ok(self.linearize(x, y, z, n, d, p))
    }

    /// Inverse of [`linearize`](Self::linearize).
    pub fn delinearize(&self, offset: Offset) -> SlotCoord {
        let i = offset.index();
        debug_assert!(i < self.len, "offset {i} beyond buffer");
        let rest = i % self.nd;
        let node_pop = i / self.nd;
        let p = node_pop % self.npop;
        let [x, y, z] = self.grid.coords(NodeIndex(node_pop / self.npop));
        SlotCoord {
            x,
            y,
            z,
            p,
            n: rest / self.off,
            d: rest % self.off,
        }
    }

    /// Where the pre-collision value of direction `(n, d)` lives at this parity.
    ///
    /// The node is `nb[1 + blend(parity, C[(1−n)·OFF + d], 0)]` per axis
    /// (upstream on odd steps, local on even ones) and the half is
    /// `blend(parity, n, 1−n)`.
    #[inline]
    pub fn read_offset(
        &self,
        parity: Parity,
        nb: &Neighbourhood,
        n: usize,
        d: usize,
        p: usize,
    ) -> Offset {
        debug_assert!(n < 2 && d < self.lattice.hspeed(), "({n}, {d}) is not an address slot");
        let c = self.lattice.velocity((1 - n) * self.off + d);
        let [x, y, z] = halo(parity, nb, c);
        self.linearize(x, y, z, blend(parity, n, 1 - n), d, p)
    }

    /// Where the post-collision value of direction `(n, d)` goes at this parity.
    ///
    /// The node is `nb[1 + blend(parity, C[n·OFF + d], 0)]` per axis
    /// (downstream on odd steps, local on even ones) and the half is
    /// `blend(parity, 1−n, n)`.
    #[inline]
    pub fn write_offset(
        &self,
        parity: Parity,
        nb: &Neighbourhood,
        n: usize,
        d: usize,
        p: usize,
    ) -> Offset {
        debug_assert!(n < 2 && d < self.lattice.hspeed(), "({n}, {d}) is not an address slot");
        let c = self.lattice.velocity(n * self.off + d);
        let [x, y, z] = halo(parity, nb, c);
        self.linearize(x, y, z, blend(parity, 1 - n, n), d, p)
    }

    /// Verify that the writes of one phase hit every active entry exactly once.
    ///
    /// Sweeps all nodes, populations and address slots, marking each write
    /// in a bitset of one bit per buffer entry. Returns the first collision
    /// found as `Err(AddressError::DuplicateWrite)`.
    pub fn check_write_exclusivity(&self, parity: Parity) -> Result<(), AddressError> {
        let mut claimed = ClaimSet::new(self.len());
        for (slot, offset) in self.writes(parity) {
            if !claimed.insert(offset.index()) {
                let first = self.first_writer(parity, offset).unwrap_or(slot);
                return Err(AddressError::DuplicateWrite {
                    parity,
                    offset: offset.index(),
                    first,
                    second: slot,
                });
            }
        }
        Ok(())
    }

    /// Every write of one phase, in sweep order.
    fn writes(&self, parity: Parity) -> impl Iterator<Item = (SlotCoord, Offset)> + '_ {
        self.grid.iter_nodes().flat_map(move |[x, y, z]| {
            let nb = self.grid.neighbourhood(x, y, z);
            (0..self.npop).flat_map(move |p| {
                self.lattice.address_slots().map(move |(n, d)| {
                    (
                        SlotCoord { x, y, z, p, n, d },
                        self.write_offset(parity, &nb, n, d, p),
                    )
                })
            })
        })
    }

    /// The first address slot in sweep order that writes `offset`.
    fn first_writer(&self, parity: Parity, offset: Offset) -> Option<SlotCoord> {
        self.writes(parity)
            .find(|&(_, o)| o == offset)
            .map(|(slot, _)| slot)
    }
}

/// Dense bitset over buffer entries.
struct ClaimSet {
    bits: Vec<u64>,
}

impl ClaimSet {
    const BITS_PER_WORD: usize = 64;

    fn new(len: usize) -> Self {
        Self {
            bits: vec![0; len.div_ceil(Self::BITS_PER_WORD)],
        }
    }

    /// Mark `index`; `false` if it was already marked.
    fn insert(&mut self, index: usize) -> bool {
        let word = &mut self.bits[index / Self::BITS_PER_WORD];
        let mask = 1u64 << (index % Self::BITS_PER_WORD);
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }
}

/// Halo lookup `nb_k[1 + blend(parity, c_k, 0)]` on each axis.
#[inline]
fn halo(parity: Parity, nb: &Neighbourhood, c: [i32; 3]) -> [u32; 3] {
    let pick = |axis: &[u32; 3], ck: i32| axis[(1 + blend(parity, ck, 0)) as usize];
    [pick(&nb.x, c[0]), pick(&nb.y, c[1]), pick(&nb.z, c[2])]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d3q19(nx: u32, ny: u32, nz: u32, npop: usize) -> AddressTranslator {
        let grid = Grid::new(nx, ny, nz).unwrap();
        AddressTranslator::new(grid, Arc::new(LatticeModel::d3q19()), npop).unwrap()
    }

    #[test]
    fn zero_populations_rejected() {
        let grid = Grid::new(2, 2, 2).unwrap();
        assert_eq!(
            AddressTranslator::new(grid, Arc::new(LatticeModel::d2q9()), 0).unwrap_err(),
            AddressError::NoPopulations
        );
    }

    #[test]
    fn linearize_formula() {
        let tr = d3q19(4, 3, 2, 2);
        // (((1·3 + 2)·4 + 3)·2 + 1)·20 + 10 + 5
        assert_eq!(tr.linearize(3, 2, 1, 1, 5, 1).index(), 955);
        assert_eq!(tr.linearize(0, 0, 0, 0, 0, 0).index(), 0);
        assert_eq!(tr.len(), 4 * 3 * 2 * 2 * 20);
    }

    #[test]
    fn try_linearize_reports_each_violation() {
        let tr = d3q19(2, 2, 2, 1);
        assert!(matches!(
            tr.try_linearize(2, 0, 0, 0, 0, 0),
            Err(AddressError::CoordOutOfBounds { .. })
        ));
        assert!(matches!(
            tr.try_linearize(0, 0, 0, 2, 0, 0),
            Err(AddressError::SlotOutOfRange { n: 2, .. })
        ));
        assert!(matches!(
            tr.try_linearize(0, 0, 0, 0, 10, 0),
            Err(AddressError::SlotOutOfRange { d: 10, .. })
        ));
        assert_eq!(
            tr.try_linearize(0, 0, 0, 0, 0, 1),
            Err(AddressError::PopulationOutOfRange { p: 1, npop: 1 })
        );
        assert_eq!(tr.try_linearize(1, 1, 1, 1, 9, 0), Ok(tr.linearize(1, 1, 1, 1, 9, 0)));
    }

    #[test]
    fn even_phase_is_local() {
        let tr = d3q19(3, 3, 3, 1);
        let nb = tr.grid().neighbourhood(1, 2, 0);
        for (n, d) in tr.lattice().address_slots() {
            let r = tr.delinearize(tr.read_offset(Parity::Even, &nb, n, d, 0));
            let w = tr.delinearize(tr.write_offset(Parity::Even, &nb, n, d, 0));
            assert_eq!([r.x, r.y, r.z], [1, 2, 0]);
            assert_eq!([w.x, w.y, w.z], [1, 2, 0]);
            assert_eq!((r.n, r.d), (1 - n, d));
            assert_eq!((w.n, w.d), (n, d));
        }
    }

    #[test]
    fn odd_phase_reads_upstream_writes_downstream() {
        let tr = d3q19(5, 5, 5, 1);
        let grid = *tr.grid();
        let nb = grid.neighbourhood(0, 4, 2);
        for (n, d) in tr.lattice().directions() {
            let c = tr.lattice().velocity(n * tr.lattice().off() + d);
            let up = grid.shifted([0, 4, 2], [-c[0], -c[1], -c[2]]);
            let down = grid.shifted([0, 4, 2], c);
            let r = tr.delinearize(tr.read_offset(Parity::Odd, &nb, n, d, 0));
            let w = tr.delinearize(tr.write_offset(Parity::Odd, &nb, n, d, 0));
            assert_eq!([r.x, r.y, r.z], up, "read of ({n}, {d})");
            assert_eq!([w.x, w.y, w.z], down, "write of ({n}, {d})");
            assert_eq!((r.n, r.d), (n, d));
            assert_eq!((w.n, w.d), (1 - n, d));
        }
    }

    #[test]
    fn rest_alternates_between_rest_and_padding_slot() {
        let tr = d3q19(2, 2, 2, 1);
        let nb = tr.grid().neighbourhood(0, 0, 0);
        let off = tr.lattice().off();
        assert_eq!(tr.read_offset(Parity::Even, &nb, 0, 0, 0).index(), off);
        assert_eq!(tr.write_offset(Parity::Even, &nb, 0, 0, 0).index(), 0);
        assert_eq!(tr.read_offset(Parity::Odd, &nb, 0, 0, 0).index(), 0);
        assert_eq!(tr.write_offset(Parity::Odd, &nb, 0, 0, 0).index(), off);
    }

    #[test]
    fn exclusivity_holds_for_presets() {
        let grid = Grid::new(3, 4, 2).unwrap();
        for lattice in [
            LatticeModel::d2q9(),
            LatticeModel::d3q15(),
            LatticeModel::d3q19(),
            LatticeModel::d3q27(),
        ] {
            let tr = AddressTranslator::new(grid, Arc::new(lattice), 2).unwrap();
            assert_eq!(tr.check_write_exclusivity(Parity::Even), Ok(()));
            assert_eq!(tr.check_write_exclusivity(Parity::Odd), Ok(()));
        }
    }

    #[test]
    fn claim_set_uses_one_bit_per_entry() {
        let mut set = ClaimSet::new(130);
        assert_eq!(set.bits.len(), 3);
        assert!(set.insert(0));
        assert!(set.insert(129));
        assert!(!set.insert(129));
        assert!(set.insert(64));
        assert!(!set.insert(0));
    }

    #[test]
    fn first_writer_finds_earliest_slot_in_sweep_order() {
        let tr = d3q19(3, 3, 3, 2);
        let nb = tr.grid().neighbourhood(2, 0, 1);
        for (n, d) in tr.lattice().address_slots() {
            let offset = tr.write_offset(Parity::Odd, &nb, n, d, 1);
            assert_eq!(
                tr.first_writer(Parity::Odd, offset),
                Some(SlotCoord {
                    x: 2,
                    y: 0,
                    z: 1,
                    p: 1,
                    n,
                    d
                })
            );
        }
    }

    #[test]
    fn writes_cover_every_entry_once() {
        let tr = d3q19(2, 3, 2, 1);
        let mut hits = vec![0u8; tr.len()];
        for (_, offset) in tr.writes(Parity::Odd) {
            hits[offset.index()] += 1;
        }
        let lattice = tr.lattice();
        for (i, &h) in hits.iter().enumerate() {
            let s = tr.delinearize(Offset::new(i));
            let active = s.d < lattice.hspeed();
            assert_eq!(h, u8::from(active), "entry {i}");
        }
    }

    proptest! {
        #[test]
        fn delinearize_inverts_linearize(
            nx in 1u32..6, ny in 1u32..6, nz in 1u32..6, npop in 1usize..4,
            raw in (0u32..64, 0u32..64, 0u32..64, 0usize..4),
            n in 0usize..2, d in 0usize..10,
        ) {
            let tr = d3q19(nx, ny, nz, npop);
            let (x, y, z, p) = (raw.0 % nx, raw.1 % ny, raw.2 % nz, raw.3 % npop);
            let s = tr.delinearize(tr.linearize(x, y, z, n, d, p));
            prop_assert_eq!(s, SlotCoord { x, y, z, p, n, d });
        }

        #[test]
        fn linearize_inverts_delinearize(
            nx in 1u32..6, ny in 1u32..6, nz in 1u32..6, npop in 1usize..4,
            seed in 0usize..1_000_000,
        ) {
            let tr = d3q19(nx, ny, nz, npop);
            let i = seed % tr.len();
            let s = tr.delinearize(Offset::new(i));
            prop_assert_eq!(tr.linearize(s.x, s.y, s.z, s.n, s.d, s.p).index(), i);
        }
    }
}
