//! Entity identification.
//!
//! Every addressable thing in a state tree (player, container, item) has an
//! `EntityId`. Actions refer to entities only through these ids, so an action
//! computed against one state can be replayed against any copy of it.
//!
//! ## ID Layout
//!
//! - `0..player_count`: reserved for players (so players can be action targets)
//! - `player_count..`: containers and items, allocated by the registry
//!
//! ```
//! use rust_tabletop::core::EntityId;
//!
//! let player_count = 4;
//! assert!(EntityId::player_id(3).is_player(player_count));
//! assert!(!EntityId(10).is_player(player_count));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any entity in a state tree.
///
/// Ids are stable across `GameState::copy`, which is what lets an action
/// recorded against one state resolve against a determinized copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Entity id for a player by index.
    #[must_use]
    pub const fn player_id(index: u8) -> Self {
        Self(index as u32)
    }

    /// First id available for containers and items.
    #[must_use]
    pub const fn first_non_player(player_count: usize) -> u32 {
        player_count as u32
    }

    /// Check if this id refers to a player in a game with `player_count` players.
    ///
    /// ```
    /// use rust_tabletop::core::EntityId;
    ///
    /// assert!(EntityId(1).is_player(2));
    /// assert!(!EntityId(1).is_player(1));
    /// ```
    #[must_use]
    pub const fn is_player(self, player_count: usize) -> bool {
        self.0 < player_count as u32
    }

    /// Convert to a `PlayerId` if this is a player entity.
    ///
    /// ```
    /// use rust_tabletop::core::{EntityId, PlayerId};
    ///
    /// assert_eq!(EntityId(2).as_player(4), Some(PlayerId::new(2)));
    /// assert_eq!(EntityId(2).as_player(2), None);
    /// ```
    #[must_use]
    pub fn as_player(self, player_count: usize) -> Option<super::PlayerId> {
        if self.is_player(player_count) {
            Some(super::PlayerId::new(self.0 as u8))
        } else {
            None
        }
    }

    /// Entity id for a player.
    #[must_use]
    pub const fn player(id: super::PlayerId) -> Self {
        Self(id.0 as u32)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_player_range() {
        for player_count in 1..=8usize {
            for i in 0..player_count {
                assert!(EntityId(i as u32).is_player(player_count));
            }
            assert!(!EntityId(player_count as u32).is_player(player_count));
        }
    }

    #[test]
    fn test_first_non_player() {
        assert_eq!(EntityId::first_non_player(2), 2);
        assert_eq!(EntityId::first_non_player(5), 5);
    }

    #[test]
    fn test_player_round_trip() {
        let entity = EntityId::player(PlayerId::new(3));
        assert_eq!(entity, EntityId::player_id(3));
        assert_eq!(entity.as_player(4), Some(PlayerId::new(3)));
        assert_eq!(EntityId(40).as_player(4), None);
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        let mut ids = vec![EntityId(9), EntityId(2), EntityId(5)];
        ids.sort();
        assert_eq!(ids, vec![EntityId(2), EntityId(5), EntityId(9)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
