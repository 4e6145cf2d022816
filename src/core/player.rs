//! Player identification, per-player storage and visibility masks.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players.
//!
//! ## PlayerMap
//!
//! Per-player data backed by a `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## PlayerMask
//!
//! One boolean per observer. Containers and individual items use masks when
//! visibility is not simply "everyone", "nobody" or "the owner".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_tabletop::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The player `delta` seats away, wrapping around the table.
    ///
    /// A negative delta walks the table backwards.
    ///
    /// ```
    /// use rust_tabletop::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(3).offset(1, 4), PlayerId::new(0));
    /// assert_eq!(PlayerId::new(0).offset(-1, 4), PlayerId::new(3));
    /// ```
    #[must_use]
    pub fn offset(self, delta: i32, player_count: usize) -> PlayerId {
        let n = player_count as i64;
        let next = (self.0 as i64 + delta as i64).rem_euclid(n);
        PlayerId(next as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use rust_tabletop::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i32> = PlayerMap::new(4, |_| 20);
/// life[PlayerId::new(1)] = 15;
/// assert_eq!(life[PlayerId::new(1)], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data.iter_mut().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Explicit per-observer visibility: one flag per player.
///
/// Observers outside the mask's range are treated as not seeing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMask {
    bits: SmallVec<[bool; 8]>,
}

impl PlayerMask {
    /// A mask where nobody sees.
    #[must_use]
    pub fn none(player_count: usize) -> Self {
        Self {
            bits: SmallVec::from_elem(false, player_count),
        }
    }

    /// A mask where everybody sees.
    #[must_use]
    pub fn all(player_count: usize) -> Self {
        Self {
            bits: SmallVec::from_elem(true, player_count),
        }
    }

    /// A mask where exactly one player sees.
    #[must_use]
    pub fn only(player: PlayerId, player_count: usize) -> Self {
        let mut mask = Self::none(player_count);
        mask.set(player, true);
        mask
    }

    /// Build a mask from explicit flags, index = player.
    #[must_use]
    pub fn from_flags(flags: &[bool]) -> Self {
        Self {
            bits: SmallVec::from_slice(flags),
        }
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> bool {
        self.bits.get(player.index()).copied().unwrap_or(false)
    }

    /// Set one player's flag, growing the mask if needed.
    pub fn set(&mut self, player: PlayerId, visible: bool) {
        if player.index() >= self.bits.len() {
            self.bits.resize(player.index() + 1, false);
        }
        self.bits[player.index()] = visible;
    }

    /// Number of players who see.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}
