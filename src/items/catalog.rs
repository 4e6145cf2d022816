//! Static item definitions.
//!
//! The catalog holds what never changes about a kind of item (its name and
//! rule constants), so item instances only carry their kind.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::item::ItemKind;

/// Immutable data for one item kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)]
    pub attributes: FxHashMap<String, i64>,
}

impl ItemDefinition {
    #[must_use]
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            attributes: FxHashMap::default(),
        }
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: i64) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.attributes.get(key).copied().unwrap_or(default)
    }
}

/// Registry of item definitions.
///
/// ```
/// use rust_tabletop::items::{ItemCatalog, ItemDefinition, ItemKind};
///
/// let mut catalog = ItemCatalog::new();
/// catalog.register(ItemDefinition::new(ItemKind::new(1), "Defuse").with_attr("copies", 6));
///
/// assert_eq!(catalog.name(ItemKind::new(1)), "Defuse");
/// assert_eq!(catalog.get(ItemKind::new(1)).unwrap().get_int("copies", 0), 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    definitions: FxHashMap<ItemKind, ItemDefinition>,
}

impl ItemCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Panics if the kind is already registered.
    pub fn register(&mut self, definition: ItemDefinition) {
        if self.definitions.contains_key(&definition.kind) {
            panic!("Item kind {:?} already registered", definition.kind);
        }
        self.definitions.insert(definition.kind, definition);
    }

    #[must_use]
    pub fn get(&self, kind: ItemKind) -> Option<&ItemDefinition> {
        self.definitions.get(&kind)
    }

    /// Display name, or `"?"` for an unknown kind.
    #[must_use]
    pub fn name(&self, kind: ItemKind) -> &str {
        self.get(kind).map_or("?", |d| d.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over definitions in kind order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by_key(|d| d.kind);
        defs.into_iter()
    }
}
