//! Items: the cards and tokens that live inside containers.
//!
//! - `Item`: one physical item in a state tree (identity, kind, owner, i64 state)
//! - `ItemKind`: the game-level type of an item (its card face)
//! - `ItemCatalog`: static per-kind definitions (name, integer attributes)

pub mod item;
pub mod catalog;

pub use item::{Item, ItemKind};
pub use catalog::{ItemCatalog, ItemDefinition};
