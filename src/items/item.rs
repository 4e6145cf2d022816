//! Item instances.
//!
//! An `Item` is a specific card or token in a state tree. Its location is not
//! stored here: the owning `GameState` tracks which container holds it, so a
//! move between containers is a single atomic update of that index.
//!
//! ## State Values (i64 only)
//!
//! Per-item mutable state uses `FxHashMap<String, i64>`, as elsewhere in the
//! kernel. Booleans are 0/1, entity references are `EntityId.0`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// Game-level type of an item (e.g. "Defuse"). Opaque to the kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKind(pub u32);

impl ItemKind {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kind({})", self.0)
    }
}

/// An item in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Registry id. Assigned on registration, preserved across copies.
    pub id: EntityId,

    pub kind: ItemKind,

    /// Who started with this item. `None` for shared items.
    pub owner: Option<PlayerId>,

    #[serde(default)]
    pub state: FxHashMap<String, i64>,
}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
        self.kind.hash(hasher);
        self.owner.hash(hasher);

        // Sorted so equal maps hash equally
        let mut entries: Vec<_> = self.state.iter().collect();
        entries.sort_by_key(|(k, _)| *k);
        for (k, v) in entries {
            k.hash(hasher);
            v.hash(hasher);
        }
    }
}

impl Item {
    /// Create an unregistered item. The registry assigns its id.
    #[must_use]
    pub fn new(kind: ItemKind) -> Self {
        Self {
            id: EntityId(u32::MAX),
            kind,
            owner: None,
            state: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn get_state(&self, key: &str, default: i64) -> i64 {
        self.state.get(key).copied().unwrap_or(default)
    }

    pub fn set_state(&mut self, key: impl Into<String>, value: i64) {
        self.state.insert(key.into(), value);
    }

    /// Modify a state value by delta.
    pub fn modify_state(&mut self, key: &str, delta: i64) {
        let current = self.get_state(key, 0);
        self.state.insert(key.to_string(), current + delta);
    }

    #[must_use]
    pub fn has_flag(&self, key: &str) -> bool {
        self.get_state(key, 0) != 0
    }

    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.set_state(key, i64::from(value));
    }
}
