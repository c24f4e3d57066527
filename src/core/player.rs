//! Player identification and per-side data storage.
//!
//! ## PlayerId
//!
//! Opaque player key handed out by an external player registry. The engine
//! only compares ids; it never resolves them.
//!
//! ## Side / SideMap
//!
//! Every match has exactly two sides. `Side::One` is team1 (or player1),
//! `Side::Two` is team2 (or player2). `SideMap` stores one value per side
//! with O(1) access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Opaque player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Identity reference for a player: id plus display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a new player reference.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Team 1 or player 1.
    One,
    /// Team 2 or player 2.
    Two,
}

impl Side {
    /// Both sides, in order.
    pub const ALL: [Side; 2] = [Side::One, Side::Two];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// 0-based index (One = 0, Two = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::One => write!(f, "Side 1"),
            Side::Two => write!(f, "Side 2"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use chase_tag::core::{Side, SideMap};
///
/// let mut scores: SideMap<u32> = SideMap::with_default();
/// scores[Side::Two] += 1;
///
/// assert_eq!(scores[Side::One], 0);
/// assert_eq!(scores[Side::Two], 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::One), factory(Side::Two)],
        }
    }

    /// Create a SideMap from explicit values.
    pub const fn from_pair(one: T, two: T) -> Self {
        Self { data: [one, two] }
    }

    /// Create a new SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new SideMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
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

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
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
