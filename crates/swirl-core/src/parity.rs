//! Time-step parity and the branchless odd/even blend.
//!
//! The AA access pattern alternates two sub-step shapes: even steps
//! collide in place, odd steps stream-collide-stream. Every address
//! computation selects between an "odd" and an "even" value with
//! [`blend`] instead of branching, so the same arithmetic runs for both
//! phases.

use std::fmt;
use std::ops::{Add, Mul};

/// Parity of a simulation time step.
///
/// Owned by the stepping driver and passed explicitly into every
/// addressing call. Toggled exactly once per completed step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parity {
    /// Even step: local collision, reversed read, regular write.
    #[default]
    Even,
    /// Odd step: neighbour read, collision, reversed write to the neighbour.
    Odd,
}

impl Parity {
    /// Parity of the given zero-based step number.
    pub fn of_step(step: u64) -> Self {
        if step % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }

    /// `true` for [`Parity::Odd`].
    pub fn is_odd(self) -> bool {
        self == Self::Odd
    }

    /// The opposite parity.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }
}

impl From<bool> for Parity {
    /// `true` maps to [`Parity::Odd`].
    fn from(odd: bool) -> Self {
        if odd {
            Self::Odd
        } else {
            Self::Even
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Even => write!(f, "even"),
            Self::Odd => write!(f, "odd"),
        }
    }
}

/// Branchless parity select: `odd_value · parity + even_value · (1 − parity)`.
///
/// `parity` is taken as `1` for [`Parity::Odd`] and `0` for
/// [`Parity::Even`], so exactly one of the two products survives. The
/// complement `1 − parity` is formed from the negated flag rather than a
/// subtraction, which keeps the function usable for unsigned types.
///
/// # Examples
///
/// ```
/// use swirl_core::{blend, Parity};
///
/// assert_eq!(blend(Parity::Odd, -1i32, 0), -1);
/// assert_eq!(blend(Parity::Even, -1i32, 0), 0);
/// assert_eq!(blend(Parity::Even, 0usize, 1), 1);
/// ```
#[inline(always)]
pub fn blend<T>(parity: Parity, odd_value: T, even_value: T) -> T
where
    T: Copy + From<u8> + Add<Output = T> + Mul<Output = T>,
{
    let odd = parity.is_odd();
    odd_value * T::from(odd as u8) + even_value * T::from(!odd as u8)
}
