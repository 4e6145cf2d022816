//! Visibility-tagged containers.
//!
//! A `Container` is an ordered sequence of item ids (a hand, a pile, the
//! discard) plus the rules for who may see each item. Visibility has two
//! layers:
//!
//! 1. The container mode (`Visibility`), fixed when the container is declared.
//! 2. Per-item overrides (`PlayerMask`), set by reveals such as "see the
//!    future" and dropped when the item leaves the container.
//!
//! Index 0 is the front of the container: the top of a pile.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::core::config::{ContainerConfig, ExchangeGroup, Visibility};
use crate::core::entity::EntityId;
use crate::core::error::ContainerError;
use crate::core::player::{PlayerId, PlayerMask};
use crate::core::rng::GameRng;

/// Where to put an item in an ordered container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsertPosition {
    /// Index 0 (top of a pile).
    Front,
    /// After the last item.
    Back,
    /// At a specific index, clamped to the container length.
    Index(usize),
}

/// An ordered, visibility-tagged collection of item ids.
///
/// ```
/// use rust_tabletop::containers::Container;
/// use rust_tabletop::core::{ContainerConfig, EntityId, PlayerId};
///
/// let config = ContainerConfig::new("Hand").with_owner(PlayerId::new(0)).owner_only();
/// let mut hand = Container::new(EntityId(2), &config);
/// hand.add(EntityId(10));
///
/// assert!(hand.is_visible_to(EntityId(10), PlayerId::new(0)));
/// assert!(!hand.is_visible_to(EntityId(10), PlayerId::new(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Container {
    pub id: EntityId,
    pub name: String,
    pub owner: Option<PlayerId>,
    pub visibility: Visibility,
    pub exchange_group: Option<ExchangeGroup>,
    items: Vector<EntityId>,
    reveals: OrdMap<EntityId, PlayerMask>,
}

impl Container {
    #[must_use]
    pub fn new(id: EntityId, config: &ContainerConfig) -> Self {
        Self {
            id,
            name: config.name.clone(),
            owner: config.owner,
            visibility: config.visibility.clone(),
            exchange_group: config.exchange_group,
            items: Vector::new(),
            reveals: OrdMap::new(),
        }
    }

    /// Append an item at the back.
    pub fn add(&mut self, item: EntityId) {
        self.items.push_back(item);
    }

    pub fn insert(&mut self, position: InsertPosition, item: EntityId) {
        match position {
            InsertPosition::Front => self.items.push_front(item),
            InsertPosition::Back => self.items.push_back(item),
            InsertPosition::Index(i) => {
                let idx = i.min(self.items.len());
                self.items.insert(idx, item);
            }
        }
    }

    /// Remove and return the front item.
    pub fn draw(&mut self) -> Result<EntityId, ContainerError> {
        let item = self.items.pop_front().ok_or(ContainerError::Empty(self.id))?;
        self.reveals.remove(&item);
        Ok(item)
    }

    pub fn peek(&self) -> Result<EntityId, ContainerError> {
        self.items.front().copied().ok_or(ContainerError::Empty(self.id))
    }

    /// Up to `n` items from the front, in order.
    #[must_use]
    pub fn peek_n(&self, n: usize) -> Vec<EntityId> {
        self.items.iter().take(n).copied().collect()
    }

    pub fn remove(&mut self, item: EntityId) -> Result<(), ContainerError> {
        let idx = self.position_of(item).ok_or(ContainerError::NotFound {
            item,
            container: self.id,
        })?;
        self.items.remove(idx);
        self.reveals.remove(&item);
        Ok(())
    }

    /// Permute the items in place.
    ///
    /// Reveals survive a shuffle only if the game keeps them; most games
    /// call `clear_reveals` afterwards.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut order: Vec<EntityId> = self.items.iter().copied().collect();
        rng.shuffle(&mut order);
        self.items = order.into_iter().collect();
    }

    #[must_use]
    pub fn contains(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }

    #[must_use]
    pub fn position_of(&self, item: EntityId) -> Option<usize> {
        self.items.index_of(&item)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<EntityId> {
        self.items.get(index).copied()
    }

    /// Replace the item at `index`. Used by redeterminization to refill slots.
    pub(crate) fn set(&mut self, index: usize, item: EntityId) {
        self.items.set(index, item);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.items.iter().copied()
    }

    /// Whether `observer` can see `item`. Items not in the container are
    /// judged by the container mode alone.
    #[must_use]
    pub fn is_visible_to(&self, item: EntityId, observer: PlayerId) -> bool {
        if let Some(mask) = self.reveals.get(&item) {
            if mask.get(observer) {
                return true;
            }
        }
        self.mode_allows(observer)
    }

    fn mode_allows(&self, observer: PlayerId) -> bool {
        match &self.visibility {
            Visibility::VisibleToAll => true,
            Visibility::HiddenToAll => false,
            Visibility::VisibleToOwner => self.owner == Some(observer),
            Visibility::Mask(mask) => mask.get(observer),
        }
    }

    /// Indices of the items `observer` cannot see, front to back.
    #[must_use]
    pub fn hidden_slots(&self, observer: PlayerId) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, &item)| !self.is_visible_to(item, observer))
            .map(|(i, _)| i)
            .collect()
    }

    #[must_use]
    pub fn is_fully_visible_to(&self, observer: PlayerId) -> bool {
        self.items.iter().all(|&item| self.is_visible_to(item, observer))
    }

    /// Let `player` see `item` regardless of the container mode.
    pub fn reveal_to(&mut self, item: EntityId, player: PlayerId) -> Result<(), ContainerError> {
        if !self.contains(item) {
            return Err(ContainerError::NotFound {
                item,
                container: self.id,
            });
        }
        let mut mask = self.reveals.get(&item).cloned().unwrap_or_default();
        mask.set(player, true);
        self.reveals.insert(item, mask);
        Ok(())
    }

    /// Drop the override for one item.
    pub fn conceal(&mut self, item: EntityId) {
        self.reveals.remove(&item);
    }

    pub fn clear_reveals(&mut self) {
        self.reveals.clear();
    }

    #[must_use]
    pub fn reveal_mask(&self, item: EntityId) -> Option<&PlayerMask> {
        self.reveals.get(&item)
    }
}
