//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! The two parties at the table. `Side::A` always opens a round.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for tallies, round wins
//! and collections.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two parties in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// First player. Opens every round.
    A,
    /// Second player.
    B,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Slot index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "Side A"),
            Side::B => write!(f, "Side B"),
        }
    }
}

/// Who decides when a side throws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Throws only on an explicit `throw()` command.
    Human,
    /// Throws automatically after the configured delay.
    Computer,
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use rust_pogs::core::{Side, SideMap};
///
/// let mut wins: SideMap<u32> = SideMap::default();
/// wins[Side::B] += 1;
///
/// assert_eq!(wins[Side::A], 0);
/// assert_eq!(wins[Side::B], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map from explicit values for A and B.
    pub fn new(a: T, b: T) -> Self {
        Self { data: [a, b] }
    }

    /// Create a map with values from a factory function.
    pub fn from_fn(mut factory: impl FnMut(Side) -> T) -> Self {
        Self::new(factory(Side::A), factory(Side::B))
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }

    /// Build a new map by applying `f` to each entry.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> SideMap<U> {
        SideMap::new(f(&self.data[0]), f(&self.data[1]))
    }
}

impl<T: Copy> SideMap<T> {
    /// Create a map with both entries set to `value`.
    pub fn splat(value: T) -> Self {
        Self::new(value, value)
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
