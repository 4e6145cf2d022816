//! Entity registry: id allocation and lookup for containers and items.
//!
//! All containers and items of a state tree live here, keyed by `EntityId`.
//! The registry also keeps the item → container index, so moving an item is
//! one operation that updates both containers and the index together.
//!
//! Storage is `im::OrdMap`: cloning the registry is O(1) with structural
//! sharing, ids are preserved 1:1, and iteration order is the id order,
//! which keeps determinization reproducible.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::container::{Container, InsertPosition};
use crate::core::config::ContainerConfig;
use crate::core::entity::EntityId;
use crate::core::error::KernelError;
use crate::items::Item;

/// Anything the registry can hold.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Item(Item),
    Container(Container),
}

impl Entity {
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Item(item) => item.id,
            Entity::Container(container) => container.id,
        }
    }
}

/// Id allocator and store for one state tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRegistry {
    entities: OrdMap<EntityId, Entity>,
    locations: OrdMap<EntityId, EntityId>,
    next_id: u32,
}

impl EntityRegistry {
    /// An empty registry whose first id follows the player ids.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            entities: OrdMap::new(),
            locations: OrdMap::new(),
            next_id: EntityId::first_non_player(player_count),
        }
    }

    /// Store an entity under the next free id and return that id.
    ///
    /// The entity's own `id` field is overwritten with the allocated id.
    pub fn register(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        match &mut entity {
            Entity::Item(item) => item.id = id,
            Entity::Container(container) => container.id = id,
        }
        self.entities.insert(id, entity);
        id
    }

    /// Create a container from its declaration.
    pub fn create_container(&mut self, config: &ContainerConfig) -> EntityId {
        self.register(Entity::Container(Container::new(EntityId(u32::MAX), config)))
    }

    /// Register an item and place it at the back of `container`.
    pub fn create_item(&mut self, item: Item, container: EntityId) -> Result<EntityId, KernelError> {
        self.container(container)?;
        let id = self.register(Entity::Item(item));
        self.container_mut(container)?.add(id);
        self.locations.insert(id, container);
        Ok(id)
    }

    pub fn resolve(&self, id: EntityId) -> Result<&Entity, KernelError> {
        self.entities.get(&id).ok_or(KernelError::DanglingReference(id))
    }

    pub fn resolve_mut(&mut self, id: EntityId) -> Result<&mut Entity, KernelError> {
        self.entities.get_mut(&id).ok_or(KernelError::DanglingReference(id))
    }

    pub fn container(&self, id: EntityId) -> Result<&Container, KernelError> {
        match self.resolve(id)? {
            Entity::Container(c) => Ok(c),
            Entity::Item(_) => Err(KernelError::WrongEntityKind {
                id,
                expected: "container",
            }),
        }
    }

    pub fn container_mut(&mut self, id: EntityId) -> Result<&mut Container, KernelError> {
        match self.resolve_mut(id)? {
            Entity::Container(c) => Ok(c),
            Entity::Item(_) => Err(KernelError::WrongEntityKind {
                id,
                expected: "container",
            }),
        }
    }

    pub fn item(&self, id: EntityId) -> Result<&Item, KernelError> {
        match self.resolve(id)? {
            Entity::Item(i) => Ok(i),
            Entity::Container(_) => Err(KernelError::WrongEntityKind { id, expected: "item" }),
        }
    }

    pub fn item_mut(&mut self, id: EntityId) -> Result<&mut Item, KernelError> {
        match self.resolve_mut(id)? {
            Entity::Item(i) => Ok(i),
            Entity::Container(_) => Err(KernelError::WrongEntityKind { id, expected: "item" }),
        }
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// The container currently holding `item`.
    #[must_use]
    pub fn location_of(&self, item: EntityId) -> Option<EntityId> {
        self.locations.get(&item).copied()
    }

    /// Move an item from wherever it is into `to`.
    ///
    /// Fails without changing anything if either id is unknown or of the
    /// wrong kind. Moving into the same container repositions the item.
    pub fn move_item(
        &mut self,
        item: EntityId,
        to: EntityId,
        position: InsertPosition,
    ) -> Result<(), KernelError> {
        self.item(item)?;
        self.container(to)?;
        let from = self.location_of(item).ok_or(KernelError::DanglingReference(item))?;

        self.container_mut(from)?.remove(item)?;
        self.container_mut(to)?.insert(position, item);
        self.locations.insert(item, to);
        Ok(())
    }

    /// Move the front item of `from` to the back of `to`.
    pub fn draw_into(&mut self, from: EntityId, to: EntityId) -> Result<EntityId, KernelError> {
        self.container(to)?;
        let item = self.container_mut(from)?.draw()?;
        self.container_mut(to)?.add(item);
        self.locations.insert(item, to);
        Ok(item)
    }

    /// Record that `item` now sits in `container`. The caller has already
    /// updated both containers' contents.
    pub(crate) fn set_location(&mut self, item: EntityId, container: EntityId) {
        self.locations.insert(item, container);
    }

    /// All containers in id order.
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.entities.values().filter_map(|e| match e {
            Entity::Container(c) => Some(c),
            Entity::Item(_) => None,
        })
    }

    /// All items in id order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.entities.values().filter_map(|e| match e {
            Entity::Item(i) => Some(i),
            Entity::Container(_) => None,
        })
    }

    /// Number of items held by containers.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.containers().map(Container::len).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Next id `register` will hand out.
    #[must_use]
    pub fn next_id(&self) -> EntityId {
        EntityId(self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ContainerError;
    use crate::items::ItemKind;

    fn setup() -> (EntityRegistry, EntityId, EntityId) {
        let mut reg = EntityRegistry::new(2);
        let pile = reg.create_container(&ContainerConfig::new("Pile").hidden());
        let discard = reg.create_container(&ContainerConfig::new("Discard"));
        (reg, pile, discard)
    }

    #[test]
    fn test_ids_follow_players() {
        let (reg, pile, discard) = setup();
        assert_eq!(pile, EntityId(2));
        assert_eq!(discard, EntityId(3));
        assert_eq!(reg.next_id(), EntityId(4));
        assert_eq!(reg.container(pile).unwrap().id, pile);
    }

    #[test]
    fn test_create_item() {
        let (mut reg, pile, _) = setup();
        let item = reg.create_item(Item::new(ItemKind::new(1)), pile).unwrap();

        assert_eq!(reg.item(item).unwrap().id, item);
        assert_eq!(reg.location_of(item), Some(pile));
        assert_eq!(reg.container(pile).unwrap().len(), 1);
        assert_eq!(reg.total_items(), 1);
    }

    #[test]
    fn test_dangling_and_wrong_kind() {
        let (mut reg, pile, _) = setup();
        let item = reg.create_item(Item::new(ItemKind::new(1)), pile).unwrap();

        assert_eq!(
            reg.resolve(EntityId(99)).unwrap_err(),
            KernelError::DanglingReference(EntityId(99))
        );
        assert_eq!(
            reg.container(item).unwrap_err(),
            KernelError::WrongEntityKind {
                id: item,
                expected: "container"
            }
        );
        assert!(matches!(
            reg.item(pile),
            Err(KernelError::WrongEntityKind { expected: "item", .. })
        ));
        assert!(reg.create_item(Item::new(ItemKind::new(1)), item).is_err());
    }

    #[test]
    fn test_move_item() {
        let (mut reg, pile, discard) = setup();
        let a = reg.create_item(Item::new(ItemKind::new(1)), pile).unwrap();
        let b = reg.create_item(Item::new(ItemKind::new(2)), pile).unwrap();

        reg.move_item(b, discard, InsertPosition::Back).unwrap();
        assert_eq!(reg.location_of(b), Some(discard));
        assert!(!reg.container(pile).unwrap().contains(b));
        assert!(reg.container(discard).unwrap().contains(b));

        // Same container moves reorder
        reg.move_item(a, pile, InsertPosition::Back).unwrap();
        assert_eq!(reg.container(pile).unwrap().len(), 1);
    }

    #[test]
    fn test_failed_move_changes_nothing() {
        let (mut reg, pile, _) = setup();
        let a = reg.create_item(Item::new(ItemKind::new(1)), pile).unwrap();
        let before = reg.clone();

        assert!(reg.move_item(a, EntityId(99), InsertPosition::Back).is_err());
        assert!(reg.move_item(EntityId(98), pile, InsertPosition::Back).is_err());
        assert_eq!(reg, before);
    }

    #[test]
    fn test_draw_into() {
        let (mut reg, pile, discard) = setup();
        let a = reg.create_item(Item::new(ItemKind::new(1)), pile).unwrap();

        assert_eq!(reg.draw_into(pile, discard), Ok(a));
        assert_eq!(reg.location_of(a), Some(discard));
        assert_eq!(
            reg.draw_into(pile, discard),
            Err(KernelError::Container(ContainerError::Empty(pile)))
        );
    }

    #[test]
    fn test_clone_preserves_ids() {
        let (mut reg, pile, _) = setup();
        for k in 0..5 {
            reg.create_item(Item::new(ItemKind::new(k)), pile).unwrap();
        }
        let copy = reg.clone();
        let ids: Vec<_> = reg.items().map(|i| i.id).collect();
        let copy_ids: Vec<_> = copy.items().map(|i| i.id).collect();
        assert_eq!(ids, copy_ids);
        assert_eq!(copy, reg);
    }
}
